//! Error types for field plotting.

use thiserror::Error;

/// Result type alias using PlotError.
pub type PlotResult<T> = Result<T, PlotError>;

/// Primary error type for plotting operations.
#[derive(Debug, Error)]
pub enum PlotError {
    // === Input Errors ===
    #[error("Axis '{0}' is empty")]
    EmptyAxis(&'static str),

    #[error("Field slice is empty")]
    EmptyField,

    #[error("Shape mismatch for '{what}': expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        what: String,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("Shell index {index} out of range for {len} radial levels")]
    ShellIndexOutOfRange { index: usize, len: usize },

    // === Identifier Errors ===
    #[error("Unknown projection: {0}")]
    UnknownProjection(String),

    #[error("Unknown colormap: {0}")]
    UnknownColormap(String),

    // === Rendering Errors ===
    #[error("Rendering backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Rendering failed: {0}")]
    RenderError(String),

    #[error("Image encoding failed: {0}")]
    EncodeError(String),

    // === Configuration Errors ===
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

impl PlotError {
    /// Create a ShapeMismatch error.
    pub fn shape_mismatch(what: impl Into<String>, expected: &[usize], actual: &[usize]) -> Self {
        Self::ShapeMismatch {
            what: what.into(),
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        }
    }

    /// Create a RenderError.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::RenderError(msg.into())
    }

    /// Create a ConfigError.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Whether the error was caused by caller-supplied data rather than the backend.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            PlotError::EmptyAxis(_)
                | PlotError::EmptyField
                | PlotError::ShapeMismatch { .. }
                | PlotError::ShellIndexOutOfRange { .. }
                | PlotError::UnknownProjection(_)
                | PlotError::UnknownColormap(_)
        )
    }
}

impl From<std::io::Error> for PlotError {
    fn from(err: std::io::Error) -> Self {
        PlotError::EncodeError(err.to_string())
    }
}

impl From<serde_json::Error> for PlotError {
    fn from(err: serde_json::Error) -> Self {
        PlotError::ConfigError(format!("JSON error: {}", err))
    }
}
