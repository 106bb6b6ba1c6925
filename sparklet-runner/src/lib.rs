//! Sparklet Runner
//!
//! Submits one Spark job per request and optionally waits for it.
//!
//! Architecture:
//! - Configuration: polling cadence from environment or defaults
//! - Services: the request handler and its response envelope
//! - Scheduler: status polling of a submitted run
//!
//! The remote service is reached through [`sparklet_client::JobClient`], so
//! everything here runs the same against the real client or a test double.

pub mod config;
pub mod error;
pub mod scheduler;
pub mod service;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use error::{HandlerError, PollError};
pub use scheduler::{PollSettings, StatusPoller};
pub use service::{Envelope, JobHandler, JobOutcome, invoke};
