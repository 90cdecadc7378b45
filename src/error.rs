//! Structured error types for stickygrid.
//!
//! Configuration problems fail loudly at construction. Per-frame input noise
//! (scroll offsets, pointer coordinates) is normalized and never reaches here.

/// All errors that can occur while building or rendering a grid.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// The grid configuration cannot produce a valid engine.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Malformed configuration JSON.
    #[error("Config JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Rendering error.
    #[error("Render error: {0}")]
    Render(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

impl GridError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration(reason.into())
    }
}

impl From<&str> for GridError {
    fn from(s: &str) -> Self {
        Self::Render(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<GridError> for wasm_bindgen::JsValue {
    fn from(e: GridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
