//! Error types for the risk_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for risk_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A clinical value was non-finite or outside its allowed domain
    #[error("Invalid input: {field} = {value} ({reason})")]
    InvalidInput {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// A tier outside 1..=5 reached the resolver
    #[error("Invalid tier: {0} (expected 1-5)")]
    InvalidTier(u8),

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

    /// No example patient has the requested id
    #[error("Unknown example patient: {0}")]
    UnknownExample(String),
}

impl Error {
    /// True for errors that reject a single record rather than the whole run
    pub fn is_record_level(&self) -> bool {
        matches!(self, Error::InvalidInput { .. } | Error::InvalidTier(_))
    }
}
