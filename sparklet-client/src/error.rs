//! Error types for the Sparklet client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the execution service
#[derive(Debug, Error)]
pub enum ClientError {
    /// The service rejected or failed the start call
    #[error("Job submission failed: {0}")]
    Submission(String),

    /// A status query failed
    #[error("Status query for run {run_id} failed: {message}")]
    Query {
        /// Run that was queried
        run_id: String,
        /// Error reported by the service or transport
        message: String,
    },

    /// The service answered without a field we rely on
    #[error("Response is missing field: {0}")]
    MissingField(&'static str),

    /// Invalid client configuration
    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// Create a query error for a run
    pub fn query(run_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Query {
            run_id: run_id.into(),
            message: message.into(),
        }
    }
}
