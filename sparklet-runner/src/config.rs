//! Runner configuration
//!
//! Polling cadence and the optional client-side wait limit.

use std::time::Duration;

use crate::scheduler::PollSettings;

/// Runner configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// How the handler follows a submitted run
    pub poll: PollSettings,
}

impl Config {
    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - POLL_INTERVAL (optional, seconds, default: 3)
    /// - MAX_POLL_WAIT (optional, seconds, default: unbounded)
    pub fn from_env() -> Self {
        let defaults = PollSettings::default();

        let interval = std::env::var("POLL_INTERVAL")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.interval);

        let max_wait = std::env::var("MAX_POLL_WAIT")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs);

        Self {
            poll: PollSettings { interval, max_wait },
        }
    }

    /// Overrides the poll interval, in seconds
    pub fn with_poll_interval(mut self, seconds: u64) -> Self {
        self.poll.interval = Duration::from_secs(seconds);
        self
    }

    /// Overrides the client-side wait limit, in seconds
    pub fn with_max_poll_wait(mut self, seconds: u64) -> Self {
        self.poll.max_wait = Some(Duration::from_secs(seconds));
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.poll.interval.is_zero() {
            anyhow::bail!("poll interval must be greater than 0");
        }

        if let Some(max_wait) = self.poll.max_wait {
            if max_wait < self.poll.interval {
                anyhow::bail!("max poll wait must be at least one poll interval");
            }
        }

        Ok(())
    }
}
