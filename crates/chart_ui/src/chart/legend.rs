//! Legend content renderer.

use std::fmt;

use chart_contract::{ActiveDataPoint, ThemeName};
use leptos::*;

use super::{use_chart_or_default, ChartConfig, SeriesLabel};
use crate::primitives::merge_layout_class;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Legend placement relative to the plot body.
pub enum LegendAlign {
    /// Above the plot.
    Top,
    /// Below the plot.
    Bottom,
}

impl Default for LegendAlign {
    fn default() -> Self {
        Self::Bottom
    }
}

impl LegendAlign {
    pub(crate) fn token(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Options for [`LegendContent`].
pub struct LegendOptions {
    /// Draws color swatches even when a series has an icon.
    pub hide_icon: bool,
    /// Field used to resolve entries instead of their data key.
    pub name_key: Option<String>,
    /// Placement relative to the plot body.
    pub vertical_align: LegendAlign,
    /// Active theme for config color fallbacks.
    pub theme: ThemeName,
}

#[derive(Clone)]
/// One legend entry.
pub struct LegendItem<'a> {
    /// Series key the entry resolved through.
    pub key: &'a str,
    /// Config label, or the raw name/key when unresolved.
    pub label: SeriesLabel,
    /// Icon shown instead of the swatch.
    pub icon: Option<ViewFn>,
    /// Swatch color.
    pub color: Option<String>,
}

impl fmt::Debug for LegendItem<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LegendItem")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("icon", &self.icon.is_some())
            .field("color", &self.color)
            .finish()
    }
}

#[derive(Debug, Clone)]
/// Resolved legend ready to render.
pub struct LegendModel<'a> {
    /// Placement token.
    pub vertical_align: LegendAlign,
    /// Entries in payload order.
    pub items: Vec<LegendItem<'a>>,
}

/// Pure legend renderer over a chart config.
#[derive(Debug, Clone)]
pub struct LegendContent<'c> {
    config: &'c ChartConfig,
    options: LegendOptions,
}

impl<'c> LegendContent<'c> {
    /// Creates a renderer for `config`.
    pub fn new(config: &'c ChartConfig, options: LegendOptions) -> Self {
        Self { config, options }
    }

    /// Resolves `payload` into legend entries. Empty payloads render nothing.
    pub fn render<'a>(&'a self, payload: &'a [ActiveDataPoint]) -> Option<LegendModel<'a>> {
        if payload.is_empty() {
            return None;
        }

        let name_key = self.options.name_key.as_deref();
        let items = payload
            .iter()
            .map(|item| {
                let resolved = self.config.resolve_payload(item, name_key);
                LegendItem {
                    key: resolved.key,
                    label: resolved.label(),
                    icon: resolved.icon().filter(|_| !self.options.hide_icon),
                    color: resolved.color(None, self.options.theme),
                }
            })
            .collect();

        Some(LegendModel {
            vertical_align: self.options.vertical_align,
            items,
        })
    }
}

#[component]
/// Legend body rendered for the host charting library's legend slot.
pub fn ChartLegendContent(
    #[prop(optional, into)] payload: MaybeSignal<Vec<ActiveDataPoint>>,
    #[prop(optional, into)] vertical_align: MaybeSignal<LegendAlign>,
    #[prop(optional)] hide_icon: bool,
    #[prop(optional, into)] name_key: Option<String>,
    #[prop(optional, into)] theme: MaybeSignal<ThemeName>,
    #[prop(optional)] layout_class: Option<&'static str>,
) -> impl IntoView {
    let chart = use_chart_or_default("ChartLegendContent");
    let class = merge_layout_class("ui-chart-legend", layout_class);

    move || {
        let config = chart.config.get();
        let payload = payload.get();
        let content = LegendContent::new(
            &config,
            LegendOptions {
                hide_icon,
                name_key: name_key.clone(),
                vertical_align: vertical_align.get(),
                theme: theme.get(),
            },
        );
        let Some(model) = content.render(&payload) else {
            return ().into_view();
        };

        let items = model
            .items
            .iter()
            .map(|entry| {
                let swatch = match &entry.icon {
                    Some(icon) => view! { <span data-ui-slot="icon">{icon.run()}</span> },
                    None => {
                        let color = entry.color.clone().unwrap_or_default();
                        view! {
                            <span
                                data-ui-slot="swatch"
                                style=format!("background-color: {color};")
                                aria-hidden="true"
                            ></span>
                        }
                    }
                };
                view! {
                    <div data-ui-slot="item" data-ui-series=entry.key.to_string()>
                        {swatch}
                        <span data-ui-slot="item-label">{entry.label.render()}</span>
                    </div>
                }
            })
            .collect_view();

        view! {
            <div
                class=class.clone()
                data-ui-primitive="true"
                data-ui-kind="chart-legend"
                data-ui-align=model.vertical_align.token()
            >
                {items}
            </div>
        }
        .into_view()
    }
}
