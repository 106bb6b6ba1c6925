//! Sparklet Client
//!
//! Talks to the serverless Spark execution service: starts job runs and
//! reports their lifecycle state.
//!
//! The [`JobClient`] trait is the seam the runner depends on. The
//! [`EmrServerlessClient`] implements it on top of the AWS SDK; tests plug in
//! their own implementations.
//!
//! # Example
//!
//! ```no_run
//! use sparklet_client::{ClientConfig, EmrServerlessClient, JobClient};
//! use sparklet_core::domain::job::JobDescription;
//! use sparklet_core::dto::submission::SubmissionRequest;
//!
//! # async fn example(description: JobDescription) -> Result<(), Box<dyn std::error::Error>> {
//! let client = EmrServerlessClient::new(ClientConfig::from_env()).await?;
//!
//! let request = SubmissionRequest::from_description(&description)?;
//! let response = client.submit(&request).await?;
//!
//! let state = client
//!     .get_state(&response.application_id, &response.run_handle())
//!     .await?;
//! println!("Run {} is {}", response.job_run_id, state);
//! # Ok(())
//! # }
//! ```

pub mod config;
mod emr;
pub mod error;

pub use config::ClientConfig;
pub use emr::EmrServerlessClient;
pub use error::{ClientError, Result};

use async_trait::async_trait;
use sparklet_core::domain::run::{RunHandle, RunState};
use sparklet_core::dto::submission::{SubmissionRequest, SubmissionResponse};

/// Access to the remote job execution service
#[async_trait]
pub trait JobClient: Send + Sync {
    /// Starts a job run
    ///
    /// # Errors
    /// [`ClientError::Submission`] when the service rejects or fails the call.
    async fn submit(&self, request: &SubmissionRequest) -> Result<SubmissionResponse>;

    /// Fetches the current state of a run
    ///
    /// States the client does not know are returned as
    /// [`RunState::Other`], never as an error.
    ///
    /// # Errors
    /// [`ClientError::Query`] when the status call fails.
    async fn get_state(&self, application_id: &str, run: &RunHandle) -> Result<RunState>;
}
