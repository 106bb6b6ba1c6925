//! Run domain types

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a submitted run, as returned by the service
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunHandle(String);

impl RunHandle {
    /// Wraps a run id returned by the service
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw run id
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle state of a run
///
/// Only `Success`, `Failed` and `Cancelled` are terminal. States the service
/// adds later land in `Other` and are treated as still running.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RunState {
    Submitted,
    Pending,
    Scheduled,
    Queued,
    Running,
    Cancelling,
    Success,
    Failed,
    Cancelled,
    Other(String),
}

impl RunState {
    /// Whether no further transition can happen
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Failed | Self::Cancelled)
    }

    /// State name as the service spells it
    pub fn as_str(&self) -> &str {
        match self {
            Self::Submitted => "SUBMITTED",
            Self::Pending => "PENDING",
            Self::Scheduled => "SCHEDULED",
            Self::Queued => "QUEUED",
            Self::Running => "RUNNING",
            Self::Cancelling => "CANCELLING",
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
            Self::Cancelled => "CANCELLED",
            Self::Other(state) => state,
        }
    }
}

impl From<&str> for RunState {
    fn from(state: &str) -> Self {
        match state {
            "SUBMITTED" => Self::Submitted,
            "PENDING" => Self::Pending,
            "SCHEDULED" => Self::Scheduled,
            "QUEUED" => Self::Queued,
            "RUNNING" => Self::Running,
            "CANCELLING" => Self::Cancelling,
            "SUCCESS" => Self::Success,
            "FAILED" => Self::Failed,
            "CANCELLED" => Self::Cancelled,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for RunState {
    fn from(state: String) -> Self {
        Self::from(state.as_str())
    }
}

impl From<RunState> for String {
    fn from(state: RunState) -> Self {
        match state {
            RunState::Other(state) => state,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
