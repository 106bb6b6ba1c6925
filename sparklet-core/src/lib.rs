//! Sparklet Core
//!
//! Core types and translation logic for submitting Spark jobs to a
//! serverless execution service.
//!
//! This crate contains:
//! - Domain types: the job description, its arguments, run handles and states
//! - DTOs: the provider-facing submission request and response
//! - Validation errors raised before anything leaves the process
//!
//! Nothing in here performs I/O. The client crate talks to the service,
//! the runner crate drives submission and polling.

pub mod domain;
pub mod dto;
pub mod error;

pub use error::{Result, ValidationError};
