//! Chart configuration, theme stylesheet synthesis, and tooltip/legend payload renderers.
//!
//! A [`ChartConfig`] is supplied once per chart. [`ChartContainer`] scopes it under a
//! page-unique [`ChartInstanceId`], injects the synthesized theme stylesheet, and exposes the
//! config to [`ChartTooltipContent`] and [`ChartLegendContent`], which correlate the host
//! charting library's active points back to their series.

mod config;
mod container;
mod error;
mod legend;
mod style;
mod tooltip;

pub use config::{ChartConfig, ResolvedSeries, SeriesConfigEntry, SeriesLabel};
pub use container::{use_chart, ChartContainer, ChartContext, ChartStyle};
pub(crate) use container::use_chart_or_default;
pub use error::{ChartConfigError, ChartError};
pub use legend::{
    ChartLegendContent, LegendAlign, LegendContent, LegendItem, LegendModel, LegendOptions,
};
pub use style::{
    color_property, color_var, synthesize, synthesize_text, ChartInstanceId, ColorDeclaration,
    ThemeRule, ThemeStylesheet,
};
pub use tooltip::{
    ChartTooltipContent, TooltipContent, TooltipFormatterArgs, TooltipFormatterInput,
    TooltipIndicator, TooltipLabelArgs, TooltipModel, TooltipOptions, TooltipRow,
};
