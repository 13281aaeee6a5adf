use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Errors raised while building a [`ChartConfig`](super::ChartConfig) from serialized input.
pub enum ChartConfigError {
    /// The document is not a JSON object of series entries.
    #[error("chart config parse failed: {0}")]
    Parse(String),
    /// A series declared a color for a theme that is not supported.
    #[error("series `{key}` declares unknown theme `{theme}`")]
    UnknownTheme {
        /// Series key carrying the bad entry.
        key: String,
        /// Theme token as written in the document.
        theme: String,
    },
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
/// Errors raised by chart components composed outside their expected tree.
pub enum ChartError {
    /// A tooltip or legend renderer was mounted outside a `ChartContainer`.
    #[error("chart renderer used outside of a ChartContainer")]
    MissingContext,
}
