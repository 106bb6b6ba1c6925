//! Job request handler
//!
//! Handles a single job request:
//! - Translating the job description into a submission request
//! - Starting the run through the job client
//! - Waiting for a terminal state when the job asks for it
//! - Mapping the outcome, or any failure, to an [`Envelope`]

use std::sync::Arc;

use serde_json::Value;
use sparklet_client::JobClient;
use sparklet_core::domain::job::JobDescription;
use sparklet_core::domain::run::RunState;
use sparklet_core::dto::submission::{SubmissionRequest, SubmissionResponse};
use tracing::{error, info};

use crate::error::HandlerError;
use crate::scheduler::{PollSettings, StatusPoller};
use crate::service::envelope::Envelope;

/// Result of a successful submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobOutcome {
    /// What the service answered to the start call
    pub response: SubmissionResponse,
    /// Terminal state, when polling was requested
    pub final_state: Option<RunState>,
}

/// Orchestrates one submission per request
pub struct JobHandler {
    client: Arc<dyn JobClient>,
    poller: StatusPoller,
}

impl JobHandler {
    /// Creates a new job handler
    pub fn new(client: Arc<dyn JobClient>, settings: PollSettings) -> Self {
        let poller = StatusPoller::new(Arc::clone(&client), settings);
        Self { client, poller }
    }

    /// Handles a raw JSON job request
    pub async fn handle_json(&self, text: &str) -> Envelope {
        self.respond(JobDescription::from_json(text)).await
    }

    /// Handles an already parsed job request
    pub async fn handle(&self, event: Value) -> Envelope {
        self.respond(JobDescription::from_value(event)).await
    }

    async fn respond(&self, description: sparklet_core::Result<JobDescription>) -> Envelope {
        let outcome = match description {
            Ok(description) => self.run(&description).await,
            Err(e) => Err(HandlerError::from(e)),
        };

        let body = outcome.and_then(|outcome| {
            serde_json::to_string(&outcome.response).map_err(HandlerError::from)
        });

        match body {
            Ok(body) => Envelope::success(body),
            Err(e) => {
                error!("An error occurred: {}", e);
                Envelope::failure(e)
            }
        }
    }

    /// Submits the job and waits for it when requested
    ///
    /// Validation happens before any call to the job client.
    pub async fn run(&self, description: &JobDescription) -> Result<JobOutcome, HandlerError> {
        let request = SubmissionRequest::from_description(description)?;
        let job = &description.job;

        info!(
            job_name = request.name(),
            application_id = request.application_id(),
            arguments = request.entry_point_arguments().len(),
            libraries = description.libraries.len(),
            created_by = job.created_by.as_deref(),
            schedule = job.schedule.as_deref(),
            "Submitting job"
        );

        let response = self.client.submit(&request).await?;
        let run = response.run_handle();
        info!(run_id = %run, "Job run submitted");

        let final_state = self
            .poller
            .poll_until_terminal(&response.application_id, &run, job.poll)
            .await?;

        Ok(JobOutcome {
            response,
            final_state,
        })
    }
}
