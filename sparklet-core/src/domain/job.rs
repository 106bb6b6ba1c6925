//! Job description domain types
//!
//! Field names on the wire follow the trigger payload (`jar`,
//! `spark_submit_parameters`, `ApplicationId`, ...). Plain snake_case aliases
//! are accepted as well.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::arguments::Arguments;
use crate::error::{Result, ValidationError};

/// Declarative description of one job-run request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobDescription {
    /// Auxiliary library references, joined into `spark.jars`
    #[serde(rename = "jar", alias = "libraries")]
    pub libraries: Vec<String>,

    /// Free-form spark-submit flags, passed through verbatim
    #[serde(rename = "spark_submit_parameters", alias = "submit_flags")]
    pub submit_flags: Vec<String>,

    /// Named driver arguments
    pub arguments: Arguments,

    /// Job metadata
    pub job: JobMetadata,
}

impl JobDescription {
    /// Reads a job description from an already-parsed JSON document
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(ValidationError::malformed)
    }

    /// Reads a job description from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(ValidationError::malformed)
    }
}

/// Job metadata
///
/// Only the name, application, execution role, timeout and polling flag
/// influence the submission. The remaining fields are informational.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobMetadata {
    #[serde(rename = "job_name", alias = "name")]
    pub name: Option<String>,

    /// Target serverless application
    #[serde(rename = "ApplicationId", alias = "application_id")]
    pub application_id: Option<String>,

    /// Role the job runs as
    #[serde(rename = "ExecutionArn", alias = "execution_role_arn")]
    pub execution_role_arn: Option<String>,

    /// Service-side execution timeout in minutes
    #[serde(rename = "ExecutionTime", alias = "execution_timeout_minutes")]
    pub execution_timeout_minutes: Option<i64>,

    /// Block until the run reaches a terminal state
    #[serde(rename = "JobStatusPolling", alias = "poll")]
    pub poll: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDate>,

    #[serde(rename = "JobActive", skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,

    /// Cron expression of the external trigger
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,

    #[serde(rename = "JobDescription", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl JobMetadata {
    /// Returns the job name, or an error if it is missing or blank
    pub fn require_name(&self) -> Result<&str> {
        required(self.name.as_deref(), "job_name")
    }

    /// Returns the application id, or an error if it is missing or blank
    pub fn require_application_id(&self) -> Result<&str> {
        required(self.application_id.as_deref(), "ApplicationId")
    }

    /// Returns the execution role, or an error if it is missing or blank
    pub fn require_execution_role_arn(&self) -> Result<&str> {
        required(self.execution_role_arn.as_deref(), "ExecutionArn")
    }

    /// Returns the timeout if one was given, rejecting non-positive values
    pub fn checked_timeout(&self) -> Result<Option<i64>> {
        match self.execution_timeout_minutes {
            Some(minutes) if minutes <= 0 => Err(ValidationError::InvalidTimeout(minutes)),
            other => Ok(other),
        }
    }
}

/// Blank means empty after trimming; the value itself is returned untouched
fn required<'a>(value: Option<&'a str>, field: &'static str) -> Result<&'a str> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ValidationError::MissingField(field)),
    }
}
