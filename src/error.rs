//! Error types for Restyle.

use thiserror::Error;

/// Library-level error type for Restyle operations.
#[derive(Error, Debug)]
pub enum RestyleError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown style '{name}'. Available styles: {available}")]
    UnknownStyle { name: String, available: String },

    #[error("Content source error: {0}")]
    Fetch(String),

    #[error("Unsupported content source: {0}")]
    UnsupportedSource(String),

    #[error("No content found: {0}")]
    ContentEmpty(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),

    #[error("External tool failed: {0}")]
    ToolFailed(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl RestyleError {
    /// Whether the error came from resolving content, as opposed to caller input.
    pub fn is_source_error(&self) -> bool {
        matches!(
            self,
            RestyleError::Fetch(_)
                | RestyleError::ContentEmpty(_)
                | RestyleError::Http(_)
                | RestyleError::ToolNotFound(_)
                | RestyleError::ToolFailed(_)
        )
    }
}

/// Result type alias for Restyle operations.
pub type Result<T> = std::result::Result<T, RestyleError>;
