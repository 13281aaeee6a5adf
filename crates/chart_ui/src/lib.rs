//! Chart component library for Leptos applications.
//!
//! The crate maps a declarative series config (labels, icons, flat or per-theme colors) onto
//! scoped CSS custom properties, and renders tooltip and legend content from the active points
//! reported by the host charting library. Drawing code references series colors through
//! [`color_var`] and stays unaware of themes. All rendered markup follows the stable
//! `data-ui-*` DOM contract.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod chart;
mod primitives;

pub use chart::{
    color_property, color_var, synthesize, synthesize_text, use_chart, ChartConfig,
    ChartConfigError, ChartContainer, ChartContext, ChartError, ChartInstanceId,
    ChartLegendContent, ChartStyle, ChartTooltipContent, ColorDeclaration, LegendAlign,
    LegendContent, LegendItem, LegendModel, LegendOptions, ResolvedSeries, SeriesConfigEntry,
    SeriesLabel, ThemeRule, ThemeStylesheet, TooltipContent, TooltipFormatterArgs,
    TooltipFormatterInput, TooltipIndicator, TooltipLabelArgs, TooltipModel, TooltipOptions,
    TooltipRow,
};
pub use chart_contract::{ActiveDataPoint, PayloadValue, ThemeName};

/// Convenience imports for application crates composing charts.
pub mod prelude {
    pub use crate::{
        color_var, use_chart, ActiveDataPoint, ChartConfig, ChartContainer, ChartLegendContent,
        ChartTooltipContent, LegendAlign, PayloadValue, SeriesConfigEntry, SeriesLabel,
        ThemeName, TooltipFormatterArgs, TooltipIndicator, TooltipLabelArgs,
    };
}
