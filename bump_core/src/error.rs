//! Error types for the bump_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for bump_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Date input could not be parsed
    #[error("Invalid date '{input}': expected YYYY-MM-DD or an ISO-8601 timestamp")]
    Parse { input: String },

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

    /// Rejected user input (symptom severity, blank names, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Missing or unusable gestational profile
    #[error("Profile error: {0}")]
    Profile(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Build a parse error for the given raw input
    pub fn parse(input: impl Into<String>) -> Self {
        Error::Parse {
            input: input.into(),
        }
    }

    /// True for malformed date input
    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Parse { .. })
    }
}
