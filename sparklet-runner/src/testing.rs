//! In-memory job client for tests

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use sparklet_client::{ClientError, JobClient, Result};
use sparklet_core::domain::run::{RunHandle, RunState};
use sparklet_core::dto::submission::{SubmissionRequest, SubmissionResponse};

/// Replays scripted answers and records every call
pub struct ScriptedJobClient {
    submit_error: Option<String>,
    states: Mutex<VecDeque<std::result::Result<RunState, String>>>,
    submitted: Mutex<Vec<SubmissionRequest>>,
    queries: Mutex<Vec<(String, RunHandle)>>,
}

impl ScriptedJobClient {
    pub fn new() -> Self {
        Self {
            submit_error: None,
            states: Mutex::new(VecDeque::new()),
            submitted: Mutex::new(Vec::new()),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Answers status queries with these states, in order
    pub fn with_states(self, states: impl IntoIterator<Item = RunState>) -> Self {
        self.states.lock().unwrap().extend(states.into_iter().map(Ok));
        self
    }

    /// Fails the next status query after the scripted states run out
    pub fn with_query_failure(self, message: &str) -> Self {
        self.states.lock().unwrap().push_back(Err(message.to_string()));
        self
    }

    /// Rejects every submission
    pub fn with_submit_failure(mut self, message: &str) -> Self {
        self.submit_error = Some(message.to_string());
        self
    }

    pub fn submitted(&self) -> Vec<SubmissionRequest> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn submit_calls(&self) -> usize {
        self.submitted.lock().unwrap().len()
    }

    pub fn state_calls(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    pub fn queries(&self) -> Vec<(String, RunHandle)> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl JobClient for ScriptedJobClient {
    async fn submit(&self, request: &SubmissionRequest) -> Result<SubmissionResponse> {
        self.submitted.lock().unwrap().push(request.clone());

        if let Some(message) = &self.submit_error {
            return Err(ClientError::Submission(message.clone()));
        }

        let job_run_id = format!("run-{}", self.submit_calls());
        Ok(SubmissionResponse {
            application_id: request.application_id().to_string(),
            arn: format!(
                "arn:aws:emr-serverless:us-east-1:123456789012:/applications/{}/jobruns/{}",
                request.application_id(),
                job_run_id
            ),
            job_run_id,
        })
    }

    async fn get_state(&self, application_id: &str, run: &RunHandle) -> Result<RunState> {
        self.queries
            .lock()
            .unwrap()
            .push((application_id.to_string(), run.clone()));

        match self.states.lock().unwrap().pop_front() {
            Some(Ok(state)) => Ok(state),
            Some(Err(message)) => Err(ClientError::query(run.as_str(), message)),
            None => Ok(RunState::Running),
        }
    }
}
