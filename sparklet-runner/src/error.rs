//! Runner error types

use std::time::Duration;

use sparklet_client::ClientError;
use sparklet_core::ValidationError;
use sparklet_core::domain::run::RunState;
use thiserror::Error;

/// Errors that end a polling loop
#[derive(Debug, Error)]
pub enum PollError {
    /// A status query failed; polling is not retried
    #[error(transparent)]
    Query(#[from] ClientError),

    /// The configured client-side wait limit ran out
    #[error("Gave up waiting for run {run_id} after {waited:?}, last state {last_state}")]
    DeadlineExceeded {
        run_id: String,
        waited: Duration,
        last_state: RunState,
    },
}

/// Any failure while handling one job request
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The job description could not be read at all
    #[error("Failed to read job description from {origin}: {source}")]
    Input {
        origin: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Poll(#[from] PollError),
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        HandlerError::Validation(ValidationError::malformed(err))
    }
}
