//! Data Transfer Objects for the execution service
//!
//! Provider-facing shapes: what we send when starting a run and what the
//! service answers.

pub mod submission;
