//! Core domain types
//!
//! These types describe a job as the trigger hands it to us (`job`,
//! `arguments`) and a submitted run as the service reports it back (`run`).
//! They are shared between the client (which talks to the service) and the
//! runner (which orchestrates a submission).

pub mod arguments;
pub mod job;
pub mod run;
