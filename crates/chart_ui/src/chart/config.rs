//! Series configuration and the key resolver shared by every chart renderer.

use std::{collections::BTreeMap, fmt, rc::Rc};

use chart_contract::{series_lookup_key, ActiveDataPoint, ThemeName};
use leptos::{IntoView, View, ViewFn};
use serde::Deserialize;

use super::{style::color_var, ChartConfigError};

#[derive(Clone)]
/// Display label for a series: plain text or a caller-supplied view.
pub enum SeriesLabel {
    /// Plain text label.
    Text(String),
    /// Custom rendered label.
    Custom(ViewFn),
}

impl SeriesLabel {
    /// Returns the label text when the label is plain text.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Custom(_) => None,
        }
    }

    /// Renders the label.
    pub fn render(&self) -> View {
        match self {
            Self::Text(text) => text.clone().into_view(),
            Self::Custom(view) => view.run(),
        }
    }

    pub(crate) fn is_blank(&self) -> bool {
        matches!(self, Self::Text(text) if text.trim().is_empty())
    }
}

impl fmt::Debug for SeriesLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl From<&str> for SeriesLabel {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for SeriesLabel {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

#[derive(Clone, Default)]
/// Display metadata for one data series.
pub struct SeriesConfigEntry {
    /// Human-readable name. Falls back to the series key when absent.
    pub label: Option<SeriesLabel>,
    /// Glyph rendered beside the label in tooltips and legends.
    pub icon: Option<ViewFn>,
    /// Flat color applied under every theme.
    pub color: Option<String>,
    /// Per-theme color overrides.
    pub theme: BTreeMap<ThemeName, String>,
}

impl SeriesConfigEntry {
    /// Creates an empty entry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the display label.
    pub fn with_label(mut self, label: impl Into<SeriesLabel>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets a custom rendered label.
    pub fn with_label_view(mut self, label: impl Into<ViewFn>) -> Self {
        self.label = Some(SeriesLabel::Custom(label.into()));
        self
    }

    /// Sets the series icon.
    pub fn with_icon(mut self, icon: impl Into<ViewFn>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Sets the flat color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Sets the color used under `theme`.
    pub fn with_theme_color(mut self, theme: ThemeName, color: impl Into<String>) -> Self {
        self.theme.insert(theme, color.into());
        self
    }

    /// Returns the color for `theme`: the theme override wins, the flat color is the fallback.
    pub fn color_for(&self, theme: ThemeName) -> Option<&str> {
        self.theme
            .get(&theme)
            .map(String::as_str)
            .or(self.color.as_deref())
    }

    /// Whether the entry declares any color at all.
    pub fn has_color(&self) -> bool {
        self.color.is_some() || !self.theme.is_empty()
    }
}

impl fmt::Debug for SeriesConfigEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeriesConfigEntry")
            .field("label", &self.label)
            .field("icon", &self.icon.as_ref().map(|_| ".."))
            .field("color", &self.color)
            .field("theme", &self.theme)
            .finish()
    }
}

#[derive(Debug, Clone, Default)]
/// Immutable mapping from series key to display metadata.
///
/// Clones share storage; a chart receiving new props gets a new config rather than a patched one.
pub struct ChartConfig {
    series: Rc<BTreeMap<String, SeriesConfigEntry>>,
}

impl ChartConfig {
    /// Creates an empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the entry for `key`.
    pub fn with_series(mut self, key: impl Into<String>, entry: SeriesConfigEntry) -> Self {
        Rc::make_mut(&mut self.series).insert(key.into(), entry);
        self
    }

    /// Parses a JSON object of `key -> { label?, color?, theme? }` entries.
    ///
    /// # Errors
    ///
    /// Returns [`ChartConfigError::Parse`] for malformed documents and
    /// [`ChartConfigError::UnknownTheme`] for theme tokens other than `light`/`dark`.
    pub fn from_json_str(raw: &str) -> Result<Self, ChartConfigError> {
        let document: BTreeMap<String, RawSeriesConfigEntry> =
            serde_json::from_str(raw).map_err(|err| ChartConfigError::Parse(err.to_string()))?;

        let mut series = BTreeMap::new();
        for (key, raw_entry) in document {
            let mut theme = BTreeMap::new();
            for (theme_token, color) in raw_entry.theme {
                let name = theme_token.parse::<ThemeName>().map_err(|_| {
                    ChartConfigError::UnknownTheme {
                        key: key.clone(),
                        theme: theme_token.clone(),
                    }
                })?;
                theme.insert(name, color);
            }
            series.insert(
                key,
                SeriesConfigEntry {
                    label: raw_entry.label.map(SeriesLabel::Text),
                    icon: None,
                    color: raw_entry.color,
                    theme,
                },
            );
        }

        Ok(Self {
            series: Rc::new(series),
        })
    }

    /// Exact-match lookup of the entry registered under `key`.
    pub fn resolve(&self, key: &str) -> Option<&SeriesConfigEntry> {
        self.series.get(key)
    }

    /// Correlates a host payload item back to its series entry.
    ///
    /// The lookup key is chosen by [`series_lookup_key`]. When `override_key` names a string
    /// field of the raw data row (pie-style charts keyed by category), that field's value is
    /// tried first.
    pub fn resolve_payload<'a>(
        &'a self,
        item: &'a ActiveDataPoint,
        override_key: Option<&'a str>,
    ) -> ResolvedSeries<'a> {
        if let Some(field) = override_key.filter(|field| !field.is_empty()) {
            if let Some(row_key) = item.row_str(field) {
                if let Some(entry) = self.resolve(row_key) {
                    return ResolvedSeries {
                        key: row_key,
                        entry: Some(entry),
                        item,
                    };
                }
            }
        }

        let key = series_lookup_key(item, override_key);
        ResolvedSeries {
            key,
            entry: self.resolve(key),
            item,
        }
    }

    /// Iterates entries in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SeriesConfigEntry)> {
        self.series.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    /// Iterates series keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    /// Number of configured series.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Whether no series are configured.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct RawSeriesConfigEntry {
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    theme: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy)]
/// A payload item paired with the config entry it resolved to, if any.
pub struct ResolvedSeries<'a> {
    /// Key used for the successful (or final) lookup.
    pub key: &'a str,
    /// Matching entry; `None` degrades to the raw payload fields.
    pub entry: Option<&'a SeriesConfigEntry>,
    /// Payload item being resolved.
    pub item: &'a ActiveDataPoint,
}

impl ResolvedSeries<'_> {
    /// Config label, then the payload name, then the key.
    pub fn label(&self) -> SeriesLabel {
        if let Some(label) = self.entry.and_then(|entry| entry.label.clone()) {
            return label;
        }
        let fallback = self
            .item
            .name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(self.key);
        SeriesLabel::Text(fallback.to_string())
    }

    /// Configured icon, if any.
    pub fn icon(&self) -> Option<ViewFn> {
        self.entry.and_then(|entry| entry.icon.clone())
    }

    /// Swatch color: explicit override, then the host-resolved fill/stroke, then the config.
    ///
    /// Config colors are referenced through the scoped custom property so the swatch follows
    /// the active theme stylesheet; `theme` only decides whether the entry has a color there.
    pub fn color(&self, override_color: Option<&str>, theme: ThemeName) -> Option<String> {
        if let Some(color) = override_color.filter(|color| !color.is_empty()) {
            return Some(color.to_string());
        }
        if let Some(color) = self.item.indicator_color() {
            return Some(color.to_string());
        }
        self.entry
            .and_then(|entry| entry.color_for(theme))
            .map(|_| color_var(self.key))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn desktop_mobile() -> ChartConfig {
        ChartConfig::new()
            .with_series(
                "desktop",
                SeriesConfigEntry::new().with_label("Desktop").with_color("blue"),
            )
            .with_series(
                "mobile",
                SeriesConfigEntry::new().with_label("Mobile").with_color("green"),
            )
    }

    #[test]
    fn resolve_returns_registered_entry_and_none_on_miss() {
        let config = desktop_mobile();

        let desktop = config.resolve("desktop").expect("desktop entry");
        assert_eq!(desktop.label.as_ref().and_then(SeriesLabel::text), Some("Desktop"));
        assert_eq!(desktop.color.as_deref(), Some("blue"));
        assert!(config.resolve("tablet").is_none());
        assert!(config.resolve("Desktop").is_none());
        assert!(config.resolve("desk").is_none());
    }

    #[test]
    fn theme_color_wins_over_flat_color() {
        let entry = SeriesConfigEntry::new()
            .with_color("gray")
            .with_theme_color(ThemeName::Dark, "#eee");

        assert_eq!(entry.color_for(ThemeName::Dark), Some("#eee"));
        assert_eq!(entry.color_for(ThemeName::Light), Some("gray"));
        assert!(entry.has_color());
        assert!(!SeriesConfigEntry::new().with_label("x").has_color());
    }

    #[test]
    fn resolve_payload_prefers_data_key_over_row_field() {
        let config = desktop_mobile();
        let item: ActiveDataPoint = serde_json::from_value(json!({
            "dataKey": "desktop",
            "name": "mobile",
            "value": 186,
            "payload": { "desktop": "mobile" }
        }))
        .expect("point");

        let resolved = config.resolve_payload(&item, None);
        assert_eq!(resolved.key, "desktop");
        assert_eq!(resolved.label().text(), Some("Desktop"));
    }

    #[test]
    fn resolve_payload_follows_row_field_for_override_key() {
        let config = ChartConfig::new().with_series(
            "chrome",
            SeriesConfigEntry::new().with_label("Chrome"),
        );
        let item: ActiveDataPoint = serde_json::from_value(json!({
            "dataKey": "visitors",
            "name": "chrome",
            "payload": { "browser": "chrome", "visitors": 275 }
        }))
        .expect("point");

        let resolved = config.resolve_payload(&item, Some("browser"));
        assert_eq!(resolved.key, "chrome");
        assert_eq!(resolved.label().text(), Some("Chrome"));
    }

    #[test]
    fn unresolved_payload_degrades_to_name_then_key() {
        let config = ChartConfig::new();
        let named = ActiveDataPoint::new("tablet").with_name("Tablets");
        assert_eq!(config.resolve_payload(&named, None).label().text(), Some("Tablets"));

        let bare = ActiveDataPoint {
            data_key: Some("tablet".to_string()),
            ..ActiveDataPoint::default()
        };
        let resolved = config.resolve_payload(&bare, None);
        assert!(resolved.entry.is_none());
        assert_eq!(resolved.label().text(), Some("tablet"));
        assert_eq!(resolved.color(None, ThemeName::Light), None);
    }

    #[test]
    fn swatch_color_prefers_override_then_host_then_config() {
        let config = desktop_mobile();
        let host_colored = ActiveDataPoint::new("desktop").with_color("#123456");
        let plain = ActiveDataPoint::new("desktop");

        let resolved = config.resolve_payload(&host_colored, None);
        assert_eq!(
            resolved.color(Some("red"), ThemeName::Light).as_deref(),
            Some("red")
        );
        assert_eq!(
            resolved.color(None, ThemeName::Light).as_deref(),
            Some("#123456")
        );
        assert_eq!(
            config
                .resolve_payload(&plain, None)
                .color(None, ThemeName::Dark)
                .as_deref(),
            Some("var(--color-desktop)")
        );
    }

    #[test]
    fn json_config_parses_labels_colors_and_themes() {
        let config = ChartConfig::from_json_str(
            r##"{
                "desktop": { "label": "Desktop", "theme": { "light": "#111", "dark": "#eee" } },
                "mobile": { "label": "Mobile", "color": "green" },
                "other": {}
            }"##,
        )
        .expect("parse config");

        assert_eq!(config.len(), 3);
        assert_eq!(config.keys().collect::<Vec<_>>(), vec!["desktop", "mobile", "other"]);
        let desktop = config.resolve("desktop").expect("desktop");
        assert_eq!(desktop.color_for(ThemeName::Dark), Some("#eee"));
        assert_eq!(desktop.color, None);
        assert!(!config.resolve("other").expect("other").has_color());
    }

    #[test]
    fn json_config_rejects_unknown_theme_and_non_objects() {
        let err = ChartConfig::from_json_str(r##"{ "desktop": { "theme": { "sepia": "#a80" } } }"##)
            .expect_err("unknown theme");
        assert_eq!(
            err,
            ChartConfigError::UnknownTheme {
                key: "desktop".to_string(),
                theme: "sepia".to_string(),
            }
        );

        let err = ChartConfig::from_json_str("[1, 2]").expect_err("array document");
        assert!(matches!(err, ChartConfigError::Parse(_)));
    }

    #[test]
    fn replacing_a_clone_leaves_the_original_untouched() {
        let config = desktop_mobile();
        let replaced = config
            .clone()
            .with_series("tablet", SeriesConfigEntry::new());

        assert!(config.resolve("tablet").is_none());
        assert_eq!(config.len(), 2);
        assert_eq!(replaced.len(), 3);
    }
}
