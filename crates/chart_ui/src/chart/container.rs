use leptos::*;

use super::{synthesize_text, ChartConfig, ChartError, ChartInstanceId};
use crate::primitives::merge_layout_class;

#[derive(Clone)]
/// Chart state shared with tooltip and legend renderers below a [`ChartContainer`].
pub struct ChartContext {
    /// Scope id of the enclosing chart.
    pub instance_id: ChartInstanceId,
    /// Current series config.
    pub config: Signal<ChartConfig>,
}

/// Returns the context of the enclosing [`ChartContainer`].
///
/// # Errors
///
/// Returns [`ChartError::MissingContext`] when called outside a chart container.
pub fn use_chart() -> Result<ChartContext, ChartError> {
    use_context::<ChartContext>().ok_or(ChartError::MissingContext)
}

pub(crate) fn use_chart_or_default(component: &'static str) -> ChartContext {
    match use_chart() {
        Ok(context) => context,
        Err(err) => {
            logging::warn!("{component}: {err}; rendering with an empty config");
            ChartContext {
                instance_id: ChartInstanceId::generate(),
                config: Signal::derive(ChartConfig::default),
            }
        }
    }
}

#[component]
/// Root of one chart: owns the instance scope, the injected theme stylesheet, and the context
/// consumed by [`ChartTooltipContent`](super::ChartTooltipContent) and
/// [`ChartLegendContent`](super::ChartLegendContent).
pub fn ChartContainer(
    /// Stable id; generated when omitted.
    #[prop(optional, into)]
    id: Option<String>,
    /// Series config. A new value replaces the previous one wholesale.
    #[prop(into)]
    config: MaybeSignal<ChartConfig>,
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] aria_label: Option<String>,
    children: Children,
) -> impl IntoView {
    let instance_id = id
        .as_deref()
        .map(ChartInstanceId::new)
        .unwrap_or_else(ChartInstanceId::generate);
    let chart_attr = instance_id.to_string();
    let config = Signal::derive(move || config.get());
    provide_context(ChartContext {
        instance_id: instance_id.clone(),
        config,
    });

    view! {
        <div
            class=merge_layout_class("ui-chart", layout_class)
            data-ui-primitive="true"
            data-ui-kind="chart"
            data-chart=chart_attr
            role="figure"
            aria-label=aria_label
        >
            <ChartStyle instance_id=instance_id config=config />
            {children()}
        </div>
    }
}

/// Current stylesheet text for `config`, or `None` when no `<style>` element should exist.
pub(crate) fn chart_style_text(
    config: Signal<ChartConfig>,
    instance_id: &ChartInstanceId,
) -> Option<String> {
    synthesize_text(&config.get(), instance_id)
}

#[component]
/// Scoped `<style>` block carrying the series color variables of one chart.
///
/// The element lives and dies with the owning view, and is omitted when no series declares a
/// color.
pub fn ChartStyle(
    instance_id: ChartInstanceId,
    #[prop(into)] config: Signal<ChartConfig>,
) -> impl IntoView {
    move || {
        chart_style_text(config, &instance_id).map(|css| {
            view! {
                <style
                    data-ui-kind="chart-style"
                    data-chart-style=instance_id.to_string()
                    inner_html=css
                ></style>
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::chart::SeriesConfigEntry;

    #[test]
    fn style_text_follows_config_replacement() {
        let runtime = create_runtime();
        let instance_id = ChartInstanceId::new("traffic");
        let config = create_rw_signal(
            ChartConfig::new().with_series("desktop", SeriesConfigEntry::new().with_label("Desktop")),
        );

        assert_eq!(chart_style_text(config.into(), &instance_id), None);

        config.set(
            ChartConfig::new().with_series("desktop", SeriesConfigEntry::new().with_color("blue")),
        );
        let css = chart_style_text(config.into(), &instance_id).expect("colored config");
        assert!(css.contains("[data-chart=chart-u-traffic]"));
        assert!(css.contains("--color-desktop: blue;"));

        config.set(ChartConfig::new());
        assert_eq!(chart_style_text(config.into(), &instance_id), None);

        runtime.dispose();
    }

    #[test]
    fn renderers_outside_a_container_degrade_to_an_empty_config() {
        let runtime = create_runtime();

        assert!(matches!(use_chart(), Err(ChartError::MissingContext)));
        let fallback = use_chart_or_default("ChartTooltipContent");
        assert!(fallback.config.get_untracked().is_empty());
        assert!(fallback.instance_id.as_str().starts_with("chart-"));

        let instance_id = ChartInstanceId::new("sales");
        provide_context(ChartContext {
            instance_id: instance_id.clone(),
            config: Signal::derive(|| {
                ChartConfig::new().with_series("desktop", SeriesConfigEntry::new())
            }),
        });
        let context = use_chart().expect("context provided");
        assert_eq!(context.instance_id, instance_id);
        assert_eq!(context.config.get_untracked().len(), 1);
        assert_eq!(use_chart_or_default("ChartLegendContent").instance_id, instance_id);

        runtime.dispose();
    }
}
