//! Error types for the console.

use thiserror::Error;

/// Reasons an intent is rejected. State is left untouched.
#[derive(Debug, Error, PartialEq)]
pub enum ConsoleError {
    /// No source with this id.
    #[error("Source not found: {0}")]
    UnknownSource(String),

    /// No mixer channel with this id.
    #[error("Audio channel not found: {0}")]
    UnknownChannel(String),

    /// Fader level outside 0.0 - 1.0, or NaN.
    #[error("Level {level} out of range for channel {id}")]
    LevelOutOfRange { id: String, level: f32 },

    /// Two sources share an id.
    #[error("Duplicate source id: {0}")]
    DuplicateSource(String),
}

/// Errors loading configuration or a session file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Document is not valid JSON for this type.
    #[error("Invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Configured value is unusable.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
