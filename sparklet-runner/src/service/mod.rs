//! Service layer
//!
//! Turns one incoming job request into a submission, optionally waits for
//! it, and answers with a uniform envelope.

pub mod envelope;
pub mod handler;
pub mod invocation;

pub use envelope::Envelope;
pub use handler::{JobHandler, JobOutcome};
pub use invocation::invoke;
