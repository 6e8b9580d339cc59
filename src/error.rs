//! Error types for the fire engine.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for fire engine operations.
pub type Result<T> = std::result::Result<T, FireError>;

/// Errors that can occur while configuring or running the fire effect.
#[derive(Error, Debug)]
pub enum FireError {
    /// Grid or viewport with a zero-sized dimension.
    #[error("Invalid dimensions: {width}x{height} (both must be positive)")]
    InvalidDimensions { width: usize, height: usize },

    /// Configuration value out of range.
    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    /// Settings file could not be parsed.
    #[error("Failed to parse settings file {}: {source}", path.display())]
    Settings {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The animation thread panicked.
    #[error("Animation loop panicked")]
    LoopPanicked,

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FireError {
    /// Shorthand for an [`FireError::InvalidConfig`] with a formatted message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
