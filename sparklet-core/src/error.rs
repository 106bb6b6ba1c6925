//! Validation errors for job descriptions

use thiserror::Error;

/// Result type alias for validation
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Problems with a job description, detected locally before any remote call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The document could not be read as a job description at all
    #[error("Malformed job description: {0}")]
    Malformed(String),

    /// A mandatory job field is missing or empty
    #[error("Missing required job field: {0}")]
    MissingField(&'static str),

    /// An argument value has a shape the translator does not handle
    #[error(
        "Unsupported value for argument '{key}': expected a string, number, boolean or flat map"
    )]
    UnsupportedValue {
        /// Argument name
        key: String,
    },

    /// The nested configuration argument is not a flat map
    #[error("Argument '{key}' must be a map of key/value configuration entries")]
    InvalidNestedConf {
        /// Argument name
        key: String,
    },

    /// Timeout must be a positive number of minutes
    #[error("Execution timeout must be a positive number of minutes, got {0}")]
    InvalidTimeout(i64),
}

impl ValidationError {
    /// Create a malformed-document error from any displayable cause
    pub fn malformed(cause: impl std::fmt::Display) -> Self {
        Self::Malformed(cause.to_string())
    }
}
