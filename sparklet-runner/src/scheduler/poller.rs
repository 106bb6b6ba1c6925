//! Run status poller
//!
//! Queries the service at a fixed interval until the run reaches a terminal
//! state. A failed query ends the loop; nothing is retried. Without a
//! `max_wait` the loop only ends on a terminal state, and the service-side
//! execution timeout bounds it.

use std::sync::Arc;

use sparklet_client::JobClient;
use sparklet_core::domain::run::{RunHandle, RunState};
use tokio::time::{self, Duration, Instant};
use tracing::{debug, info, warn};

use crate::error::PollError;

/// Default pause between two status queries
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Polling cadence and optional client-side deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    /// Pause between two status queries
    pub interval: Duration,

    /// Stop waiting once this much time has passed
    pub max_wait: Option<Duration>,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_wait: None,
        }
    }
}

/// Follows a submitted run through its lifecycle
pub struct StatusPoller {
    client: Arc<dyn JobClient>,
    settings: PollSettings,
}

impl StatusPoller {
    /// Creates a new status poller
    pub fn new(client: Arc<dyn JobClient>, settings: PollSettings) -> Self {
        Self { client, settings }
    }

    /// Performs a single status query
    pub async fn poll(&self, application_id: &str, run: &RunHandle) -> Result<RunState, PollError> {
        Ok(self.client.get_state(application_id, run).await?)
    }

    /// Waits for the run to finish
    ///
    /// Returns `None` without querying anything when `poll_for_completion`
    /// is false, otherwise the terminal state that ended the loop.
    ///
    /// With a `max_wait`, the last pause is shortened so that one more query
    /// lands on the deadline; the loop gives up only once `max_wait` has
    /// fully elapsed.
    pub async fn poll_until_terminal(
        &self,
        application_id: &str,
        run: &RunHandle,
        poll_for_completion: bool,
    ) -> Result<Option<RunState>, PollError> {
        if !poll_for_completion {
            debug!(run_id = %run, "Status polling not requested");
            return Ok(None);
        }

        info!(
            run_id = %run,
            interval = ?self.settings.interval,
            max_wait = ?self.settings.max_wait,
            "Polling job status"
        );

        let started = Instant::now();
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            let state = self.poll(application_id, run).await?;
            info!(run_id = %run, state = %state, attempt, "Job status");

            if state.is_terminal() {
                info!(
                    run_id = %run,
                    state = %state,
                    elapsed = ?started.elapsed(),
                    "Job reached terminal state"
                );
                return Ok(Some(state));
            }

            let mut pause = self.settings.interval;
            if let Some(max_wait) = self.settings.max_wait {
                let waited = started.elapsed();
                if waited >= max_wait {
                    warn!(run_id = %run, state = %state, ?waited, "Giving up on job status");
                    return Err(PollError::DeadlineExceeded {
                        run_id: run.to_string(),
                        waited,
                        last_state: state,
                    });
                }
                pause = pause.min(max_wait - waited);
            }

            time::sleep(pause).await;
        }
    }
}
