//! Shared chart payload contracts used by the chart config resolver, the theme style
//! synthesizer, and the tooltip/legend renderers.
//!
//! This crate is intentionally runtime-agnostic. It defines theme names, the active data point
//! shape reported by the host charting library, and value display formatting without depending
//! on Leptos or browser APIs.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Lookup key used when a payload item carries neither a data key nor a name.
pub const FALLBACK_SERIES_KEY: &str = "value";

/// Theme contexts a chart can be rendered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeName {
    /// Default theme, selected when no theme class is present.
    Light,
    /// Dark theme, selected by a `.dark` ancestor.
    Dark,
}

impl ThemeName {
    /// Every supported theme in emission order.
    pub const ALL: [ThemeName; 2] = [ThemeName::Light, ThemeName::Dark];

    /// Returns the stable theme token.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Returns the ancestor selector that activates this theme (empty for the default theme).
    pub fn selector_prefix(self) -> &'static str {
        match self {
            Self::Light => "",
            Self::Dark => ".dark",
        }
    }
}

impl Default for ThemeName {
    fn default() -> Self {
        Self::Light
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a theme token is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownThemeName(pub String);

impl fmt::Display for UnknownThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown theme `{}`", self.0)
    }
}

impl std::error::Error for UnknownThemeName {}

impl FromStr for ThemeName {
    type Err = UnknownThemeName;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(UnknownThemeName(raw.to_string())),
        }
    }
}

/// Value carried by an active data point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PayloadValue {
    /// Numeric series value.
    Number(f64),
    /// Pre-formatted or categorical value.
    Text(String),
}

impl PayloadValue {
    /// Formats the value for display.
    ///
    /// Numbers use en-US digit grouping with at most three fraction digits. Text is passed
    /// through unchanged.
    pub fn display(&self) -> String {
        match self {
            Self::Number(number) => format_number(*number),
            Self::Text(text) => text.clone(),
        }
    }
}

impl From<f64> for PayloadValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for PayloadValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for PayloadValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PayloadValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl fmt::Display for PayloadValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// One data point reported by the host charting library at hover/focus time.
///
/// Every field is optional: the host contract is unversioned and payloads are frequently only
/// partially populated.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActiveDataPoint {
    /// Series identifier (field name in the underlying data rows).
    pub data_key: Option<String>,
    /// Display name supplied by the host library.
    pub name: Option<String>,
    /// Series value at the active point.
    pub value: Option<PayloadValue>,
    /// Stroke/series color resolved by the host library.
    pub color: Option<String>,
    /// Fill color for area/bar/pie shapes.
    pub fill: Option<String>,
    /// Raw data row the point was taken from. `null` reads as an empty row.
    #[serde(deserialize_with = "null_as_empty_row")]
    pub payload: Map<String, Value>,
}

fn null_as_empty_row<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

impl ActiveDataPoint {
    /// Creates a point for `data_key` with the name mirrored from the key.
    pub fn new(data_key: impl Into<String>) -> Self {
        let data_key = data_key.into();
        Self {
            name: Some(data_key.clone()),
            data_key: Some(data_key),
            ..Self::default()
        }
    }

    /// Sets the point value.
    pub fn with_value(mut self, value: impl Into<PayloadValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the host-resolved color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Sets the raw data row.
    pub fn with_row(mut self, row: Map<String, Value>) -> Self {
        self.payload = row;
        self
    }

    /// Returns a string field from the raw data row.
    pub fn row_str(&self, field: &str) -> Option<&str> {
        self.payload.get(field).and_then(Value::as_str)
    }

    /// Returns the indicator color: the raw row's `fill`, then the point fill, then the series
    /// color.
    pub fn indicator_color(&self) -> Option<&str> {
        self.row_str("fill")
            .or(self.fill.as_deref())
            .or(self.color.as_deref())
            .filter(|color| !color.is_empty())
    }
}

/// Picks the key used to correlate `item` back to a series config entry.
///
/// An explicit `override_key` wins, then `data_key`, then `name`, then [`FALLBACK_SERIES_KEY`].
/// `data_key` identifies the series the point belongs to, so it outranks both the display name
/// and any same-named field in the raw row.
pub fn series_lookup_key<'a>(item: &'a ActiveDataPoint, override_key: Option<&'a str>) -> &'a str {
    override_key
        .filter(|key| !key.is_empty())
        .or_else(|| item.data_key.as_deref().filter(|key| !key.is_empty()))
        .or_else(|| item.name.as_deref().filter(|name| !name.is_empty()))
        .unwrap_or(FALLBACK_SERIES_KEY)
}

fn format_number(number: f64) -> String {
    if !number.is_finite() {
        return number.to_string();
    }

    let fixed = format!("{number:.3}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let (integer, fraction) = match digits.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (digits, None),
    };

    let mut out = String::with_capacity(trimmed.len() + integer.len() / 3 + 1);
    if negative && (integer != "0" || fraction.is_some()) {
        out.push('-');
    }
    for (index, ch) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}
