//! Error types for the barload_core library.
//!
//! The calculation modules never return errors: degenerate input yields a
//! sentinel (`0.0` or `None`). Errors only come from the ambient layer
//! (configuration and history files).

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for barload_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// History file could not be interpreted
    #[error("History error: {0}")]
    History(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
