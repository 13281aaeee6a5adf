//! Scoped theme stylesheet synthesis for chart series colors.

use std::{
    fmt,
    sync::atomic::{AtomicUsize, Ordering},
};

use chart_contract::ThemeName;

use super::ChartConfig;

static NEXT_CHART_INSTANCE_ID: AtomicUsize = AtomicUsize::new(1);

/// Custom-property name carrying the color of series `key`.
pub fn color_property(key: &str) -> String {
    format!("--color-{key}")
}

/// `var()` reference drawing code uses for the color of series `key`.
pub fn color_var(key: &str) -> String {
    format!("var({})", color_property(key))
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Page-unique identifier scoping one chart's stylesheet.
///
/// Generated ids are `chart-<n>`; caller ids live in the separate `chart-u-<escaped>` namespace
/// so the two can never coincide.
pub struct ChartInstanceId(String);

impl ChartInstanceId {
    /// Builds an id from caller input, or generates one when `raw` is empty.
    ///
    /// Characters outside `[A-Za-z0-9-]` are escaped as `_<hex>_`, keeping distinct inputs
    /// distinct.
    pub fn new(raw: &str) -> Self {
        if raw.is_empty() {
            return Self::generate();
        }
        let mut escaped = String::with_capacity(raw.len());
        for ch in raw.chars() {
            if ch.is_ascii_alphanumeric() || ch == '-' {
                escaped.push(ch);
            } else {
                escaped.push_str(&format!("_{:x}_", u32::from(ch)));
            }
        }
        Self(format!("chart-u-{escaped}"))
    }

    /// Allocates the next process-unique id.
    pub fn generate() -> Self {
        let next = NEXT_CHART_INSTANCE_ID.fetch_add(1, Ordering::Relaxed);
        Self(format!("chart-{next}"))
    }

    /// Returns the id text used for the `data-chart` attribute.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Attribute selector matching this chart's root element.
    pub fn scope_selector(&self) -> String {
        format!("[data-chart={}]", self.0)
    }
}

impl fmt::Display for ChartInstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One `--color-<key>: <value>` declaration.
pub struct ColorDeclaration {
    /// Custom-property name.
    pub property: String,
    /// CSS color value, passed through unvalidated.
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Declarations emitted for one theme selector.
pub struct ThemeRule {
    /// Theme the rule applies to.
    pub theme: ThemeName,
    /// Full selector, including the instance scope.
    pub selector: String,
    /// Declarations in ascending series-key order.
    pub declarations: Vec<ColorDeclaration>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Synthesized stylesheet for one chart instance.
pub struct ThemeStylesheet {
    instance_id: ChartInstanceId,
    rules: Vec<ThemeRule>,
}

impl ThemeStylesheet {
    /// Instance the stylesheet is scoped to.
    pub fn instance_id(&self) -> &ChartInstanceId {
        &self.instance_id
    }

    /// Rules in [`ThemeName::ALL`] order.
    pub fn rules(&self) -> &[ThemeRule] {
        &self.rules
    }

    /// Rule emitted for `theme`.
    pub fn rule(&self, theme: ThemeName) -> Option<&ThemeRule> {
        self.rules.iter().find(|rule| rule.theme == theme)
    }

    /// `(selector, property)` pairs identifying every scoped variable in the stylesheet.
    pub fn scoped_variables(&self) -> impl Iterator<Item = (&str, &str)> {
        self.rules.iter().flat_map(|rule| {
            rule.declarations
                .iter()
                .map(move |decl| (rule.selector.as_str(), decl.property.as_str()))
        })
    }
}

impl fmt::Display for ThemeStylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, rule) in self.rules.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{} {{", rule.selector)?;
            for decl in &rule.declarations {
                writeln!(f, "  {}: {};", decl.property, decl.value)?;
            }
            writeln!(f, "}}")?;
        }
        Ok(())
    }
}

/// Builds the theme stylesheet for `config`, scoped to `instance_id`.
///
/// Returns `None` when no entry declares a color or theme map, so no empty style block is
/// injected. Otherwise emits one rule per theme, each holding a declaration for every series
/// with a color under that theme.
pub fn synthesize(config: &ChartConfig, instance_id: &ChartInstanceId) -> Option<ThemeStylesheet> {
    let colored: Vec<_> = config.iter().filter(|(_, entry)| entry.has_color()).collect();
    if colored.is_empty() {
        return None;
    }

    let scope = instance_id.scope_selector();
    let rules = ThemeName::ALL
        .iter()
        .map(|&theme| {
            let selector = match theme.selector_prefix() {
                "" => scope.clone(),
                prefix => format!("{prefix} {scope}"),
            };
            let declarations = colored
                .iter()
                .filter_map(|(key, entry)| {
                    entry.color_for(theme).map(|value| ColorDeclaration {
                        property: color_property(key),
                        value: value.to_string(),
                    })
                })
                .collect();
            ThemeRule {
                theme,
                selector,
                declarations,
            }
        })
        .collect();

    Some(ThemeStylesheet {
        instance_id: instance_id.clone(),
        rules,
    })
}

/// Style text for `config`, ready to inject as a `<style>` body.
pub fn synthesize_text(config: &ChartConfig, instance_id: &ChartInstanceId) -> Option<String> {
    synthesize(config, instance_id).map(|sheet| sheet.to_string())
}
