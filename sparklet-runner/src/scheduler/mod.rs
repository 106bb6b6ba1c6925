//! Scheduler layer for the runner
//!
//! Follows a submitted run until the service reports a terminal state.

pub mod poller;

pub use poller::{PollSettings, StatusPoller};
