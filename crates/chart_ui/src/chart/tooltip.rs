//! Tooltip content renderer: correlates the host library's active points with the chart config.

use std::{fmt, rc::Rc};

use chart_contract::{ActiveDataPoint, PayloadValue, ThemeName};
use leptos::*;

use super::{use_chart_or_default, ChartConfig, SeriesLabel};
use crate::primitives::{bool_token, merge_layout_class};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Swatch style drawn beside each tooltip row.
pub enum TooltipIndicator {
    /// Small square swatch.
    Dot,
    /// Vertical bar spanning the row.
    Line,
    /// Dashed outline bar.
    Dashed,
}

impl Default for TooltipIndicator {
    fn default() -> Self {
        Self::Dot
    }
}

impl TooltipIndicator {
    pub(crate) fn token(self) -> &'static str {
        match self {
            Self::Dot => "dot",
            Self::Line => "line",
            Self::Dashed => "dashed",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Formatting options for [`TooltipContent`].
pub struct TooltipOptions {
    /// Suppresses the header row; series rows still render.
    pub hide_label: bool,
    /// Suppresses the color swatch.
    pub hide_indicator: bool,
    /// Swatch style.
    pub indicator: TooltipIndicator,
    /// Field used to resolve the header label instead of the first item's series.
    pub label_key: Option<String>,
    /// Field used to resolve each row instead of its data key.
    pub name_key: Option<String>,
    /// Swatch color applied to every row.
    pub color: Option<String>,
    /// Active theme for config color fallbacks.
    pub theme: ThemeName,
}

#[derive(Clone)]
/// One resolved tooltip row, in payload order.
pub struct TooltipRow<'a> {
    /// Position in the payload.
    pub index: usize,
    /// Series key the row resolved through.
    pub key: &'a str,
    /// Payload item backing the row.
    pub item: &'a ActiveDataPoint,
    /// Config label, or the raw name/key when unresolved.
    pub label: SeriesLabel,
    /// Formatted value; `None` when the point carries no value.
    pub value: Option<String>,
    /// Swatch color.
    pub color: Option<String>,
    /// Configured icon, replacing the swatch.
    pub icon: Option<ViewFn>,
}

impl fmt::Debug for TooltipRow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TooltipRow")
            .field("index", &self.index)
            .field("key", &self.key)
            .field("label", &self.label)
            .field("value", &self.value)
            .field("color", &self.color)
            .field("icon", &self.icon.is_some())
            .finish()
    }
}

impl TooltipRow<'_> {
    /// Plain-text rendering (`"<label> <value>"`) used for titles and assistive text.
    pub fn plain_text(&self) -> String {
        let label = self.label.text().unwrap_or(self.key);
        match &self.value {
            Some(value) => format!("{label} {value}"),
            None => label.to_string(),
        }
    }
}

/// Arguments passed to a per-row formatter.
#[derive(Debug, Clone, Copy)]
pub struct TooltipFormatterInput<'a> {
    /// Row value.
    pub value: Option<&'a PayloadValue>,
    /// Row name (payload name, or the lookup key).
    pub name: &'a str,
    /// Row payload item.
    pub item: &'a ActiveDataPoint,
    /// Row position.
    pub index: usize,
    /// Whole payload.
    pub payload: &'a [ActiveDataPoint],
}

#[derive(Debug, Clone)]
/// Resolved tooltip ready to render.
pub struct TooltipModel<'a> {
    /// Header label; `None` when hidden or empty.
    pub header: Option<SeriesLabel>,
    /// Whether the caller hid the header.
    pub hide_label: bool,
    /// Series rows in payload order.
    pub rows: Vec<TooltipRow<'a>>,
    /// Swatch style.
    pub indicator: TooltipIndicator,
    /// Whether swatches are hidden.
    pub hide_indicator: bool,
    /// Header is drawn inside the single row instead of above it.
    pub nest_label: bool,
    /// Payload the model was built from.
    pub payload: &'a [ActiveDataPoint],
}

impl<'a> TooltipModel<'a> {
    /// Calls `formatter` once per row, in payload order.
    pub fn format_rows<T>(
        &self,
        mut formatter: impl FnMut(TooltipFormatterInput<'a>) -> T,
    ) -> Vec<T> {
        self.rows
            .iter()
            .map(|row| {
                formatter(TooltipFormatterInput {
                    value: row.item.value.as_ref(),
                    name: row.item.name.as_deref().unwrap_or(row.key),
                    item: row.item,
                    index: row.index,
                    payload: self.payload,
                })
            })
            .collect()
    }

    /// Builds the header: `label_formatter` replaces the resolved label when supplied.
    /// Nothing is built when the caller hid the header.
    pub(crate) fn header_with<T>(
        &self,
        payload: &Rc<[ActiveDataPoint]>,
        label_formatter: Option<impl Fn(TooltipLabelArgs) -> T>,
        render: impl Fn(&SeriesLabel) -> T,
    ) -> Option<T> {
        if self.hide_label {
            return None;
        }
        match label_formatter {
            Some(label_formatter) => Some(label_formatter(TooltipLabelArgs {
                label: self.header.clone(),
                payload: payload.clone(),
            })),
            None => self.header.as_ref().map(render),
        }
    }

    /// Builds one output per row. `formatter` handles rows carrying a value; every other row
    /// goes through `default_row`.
    pub(crate) fn rows_with<T>(
        &self,
        payload: &Rc<[ActiveDataPoint]>,
        formatter: Option<impl Fn(TooltipFormatterArgs) -> T>,
        mut default_row: impl FnMut(&TooltipRow<'a>) -> T,
    ) -> Vec<T> {
        self.format_rows(|input| match formatter.as_ref() {
            Some(formatter) if input.value.is_some() => formatter(TooltipFormatterArgs {
                value: input.value.cloned(),
                name: input.name.to_string(),
                item: input.item.clone(),
                index: input.index,
                payload: payload.clone(),
            }),
            _ => default_row(&self.rows[input.index]),
        })
    }
}

/// Pure tooltip renderer over a chart config.
#[derive(Debug, Clone)]
pub struct TooltipContent<'c> {
    config: &'c ChartConfig,
    options: TooltipOptions,
}

impl<'c> TooltipContent<'c> {
    /// Creates a renderer for `config`.
    pub fn new(config: &'c ChartConfig, options: TooltipOptions) -> Self {
        Self { config, options }
    }

    /// Resolves `payload` into a tooltip model.
    ///
    /// Returns `None` when the tooltip is inactive or the payload is empty.
    pub fn render<'a>(
        &'a self,
        active: bool,
        payload: &'a [ActiveDataPoint],
        label: Option<&str>,
    ) -> Option<TooltipModel<'a>> {
        if !active || payload.is_empty() {
            return None;
        }

        let name_key = self.options.name_key.as_deref();
        let rows = payload
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let resolved = self.config.resolve_payload(item, name_key);
                TooltipRow {
                    index,
                    key: resolved.key,
                    item,
                    label: resolved.label(),
                    value: item.value.as_ref().map(PayloadValue::display),
                    color: resolved.color(self.options.color.as_deref(), self.options.theme),
                    icon: resolved.icon(),
                }
            })
            .collect();

        let header = if self.options.hide_label {
            None
        } else {
            self.header(payload, label)
        };

        Some(TooltipModel {
            header,
            hide_label: self.options.hide_label,
            rows,
            indicator: self.options.indicator,
            hide_indicator: self.options.hide_indicator,
            nest_label: payload.len() == 1 && self.options.indicator != TooltipIndicator::Dot,
            payload,
        })
    }

    fn header(&self, payload: &[ActiveDataPoint], label: Option<&str>) -> Option<SeriesLabel> {
        let label_key = self.options.label_key.as_deref();
        let header = match (label_key, label) {
            (None, Some(text)) => Some(
                self.config
                    .resolve(text)
                    .and_then(|entry| entry.label.clone())
                    .unwrap_or_else(|| SeriesLabel::Text(text.to_string())),
            ),
            _ => {
                let first = payload.first()?;
                self.config
                    .resolve_payload(first, label_key)
                    .entry
                    .and_then(|entry| entry.label.clone())
            }
        };
        header.filter(|header| !header.is_blank())
    }
}

/// Owned per-row formatter arguments for [`ChartTooltipContent`].
#[derive(Debug, Clone)]
pub struct TooltipFormatterArgs {
    /// Row value.
    pub value: Option<PayloadValue>,
    /// Row name.
    pub name: String,
    /// Row payload item.
    pub item: ActiveDataPoint,
    /// Row position.
    pub index: usize,
    /// Whole payload.
    pub payload: Rc<[ActiveDataPoint]>,
}

/// Owned header formatter arguments for [`ChartTooltipContent`].
#[derive(Debug, Clone)]
pub struct TooltipLabelArgs {
    /// Resolved header label, if any.
    pub label: Option<SeriesLabel>,
    /// Whole payload.
    pub payload: Rc<[ActiveDataPoint]>,
}

#[component]
/// Tooltip body rendered for the host charting library's hover/focus callback.
pub fn ChartTooltipContent(
    #[prop(optional, into)] active: MaybeSignal<bool>,
    #[prop(optional, into)] payload: MaybeSignal<Vec<ActiveDataPoint>>,
    #[prop(optional, into)] label: MaybeSignal<String>,
    #[prop(optional)] hide_label: bool,
    #[prop(optional)] hide_indicator: bool,
    #[prop(optional)] indicator: TooltipIndicator,
    #[prop(optional, into)] label_key: Option<String>,
    #[prop(optional, into)] name_key: Option<String>,
    #[prop(optional, into)] color: Option<String>,
    #[prop(optional, into)] theme: MaybeSignal<ThemeName>,
    #[prop(optional)] formatter: Option<Callback<TooltipFormatterArgs, View>>,
    #[prop(optional)] label_formatter: Option<Callback<TooltipLabelArgs, View>>,
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional)] label_class: Option<&'static str>,
) -> impl IntoView {
    let chart = use_chart_or_default("ChartTooltipContent");
    let class = merge_layout_class("ui-chart-tooltip", layout_class);

    move || {
        let config = chart.config.get();
        let payload = payload.get();
        let label = label.get();
        let content = TooltipContent::new(
            &config,
            TooltipOptions {
                hide_label,
                hide_indicator,
                indicator,
                label_key: label_key.clone(),
                name_key: name_key.clone(),
                color: color.clone(),
                theme: theme.get(),
            },
        );
        let label = Some(label.as_str()).filter(|label| !label.is_empty());
        let Some(model) = content.render(active.get(), &payload, label) else {
            return ().into_view();
        };

        let shared_payload: Rc<[ActiveDataPoint]> = payload.iter().cloned().collect();
        let header = model.header_with(
            &shared_payload,
            label_formatter.as_ref().map(|label_formatter| {
                move |args: TooltipLabelArgs| label_formatter.call(args)
            }),
            SeriesLabel::render,
        );
        let header_view = header.map(|header| {
            view! {
                <div class=merge_layout_class("ui-chart-tooltip-label", label_class) data-ui-slot="label">
                    {header}
                </div>
            }
            .into_view()
        });

        let rows = model.rows_with(
            &shared_payload,
            formatter
                .as_ref()
                .map(|formatter| move |args: TooltipFormatterArgs| formatter.call(args)),
            |row| tooltip_row_view(&model, row, header_view.clone()),
        );
        let top_header = if model.nest_label { None } else { header_view };

        view! {
            <div
                class=class.clone()
                data-ui-primitive="true"
                data-ui-kind="chart-tooltip"
                data-ui-indicator=model.indicator.token()
                role="tooltip"
            >
                {top_header}
                <div data-ui-slot="rows">{rows}</div>
            </div>
        }
        .into_view()
    }
}

fn tooltip_row_view(model: &TooltipModel<'_>, row: &TooltipRow<'_>, header: Option<View>) -> View {
    let swatch = match (&row.icon, model.hide_indicator) {
        (Some(icon), _) => Some(view! { <span data-ui-slot="icon">{icon.run()}</span> }.into_view()),
        (None, false) => {
            let color = row.color.clone().unwrap_or_default();
            Some(
                view! {
                    <span
                        data-ui-slot="indicator"
                        data-ui-indicator=model.indicator.token()
                        data-ui-nested=bool_token(model.nest_label)
                        style=format!("--color-bg: {color}; --color-border: {color};")
                        aria-hidden="true"
                    ></span>
                }
                .into_view(),
            )
        }
        (None, true) => None,
    };
    let nested_header = if model.nest_label { header } else { None };

    view! {
        <div
            data-ui-slot="row"
            data-ui-series=row.key.to_string()
            title=row.plain_text()
        >
            {swatch}
            <div data-ui-slot="row-body">
                <div data-ui-slot="row-copy">
                    {nested_header}
                    <span data-ui-slot="row-label">{row.label.render()}</span>
                </div>
                {row.value.clone().map(|value| view! { <span data-ui-slot="row-value">{value}</span> })}
            </div>
        </div>
    }
    .into_view()
}
