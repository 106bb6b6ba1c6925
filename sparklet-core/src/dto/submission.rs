//! Submission DTOs
//!
//! [`SubmissionRequest`] is assembled once per submission from a
//! [`JobDescription`] and is read-only afterwards.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::job::{JobDescription, JobMetadata};
use crate::domain::run::RunHandle;
use crate::error::Result;

/// Driver stub shipped with the serverless Spark runtime
///
/// The job logic is chosen through `--class` and the entry-point arguments,
/// so every submission points at the same jar.
pub const SPARK_EXAMPLES_ENTRY_POINT: &str =
    "local:///usr/lib/spark/examples/jars/spark-examples.jar";

/// Builds the spark-submit parameter string
///
/// The `spark.jars` flag always comes first so that a later flag in
/// `submit_flags` can override it.
pub fn spark_submit_parameters(libraries: &[String], submit_flags: &[String]) -> String {
    format!(
        "--conf spark.jars={} {}",
        libraries.join(","),
        submit_flags.join(" ")
    )
}

/// Request to start a Spark job run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    application_id: String,
    client_token: Uuid,
    execution_role_arn: String,
    name: String,
    entry_point: &'static str,
    entry_point_arguments: Vec<String>,
    spark_submit_parameters: String,
    execution_timeout_minutes: Option<i64>,
}

impl SubmissionRequest {
    /// Translates a job description into a submission request
    pub fn from_description(description: &JobDescription) -> Result<Self> {
        let entry_point_arguments = description.arguments.entry_point_arguments()?;
        Self::build(
            &description.libraries,
            &description.submit_flags,
            entry_point_arguments,
            &description.job,
        )
    }

    /// Assembles a request from already translated arguments
    ///
    /// Generates a fresh client token on every call.
    pub fn build(
        libraries: &[String],
        submit_flags: &[String],
        entry_point_arguments: Vec<String>,
        job: &JobMetadata,
    ) -> Result<Self> {
        let application_id = job.require_application_id()?.to_string();
        let execution_role_arn = job.require_execution_role_arn()?.to_string();
        let name = job.require_name()?.to_string();
        let execution_timeout_minutes = job.checked_timeout()?;

        Ok(Self {
            application_id,
            client_token: Uuid::new_v4(),
            execution_role_arn,
            name,
            entry_point: SPARK_EXAMPLES_ENTRY_POINT,
            entry_point_arguments,
            spark_submit_parameters: spark_submit_parameters(libraries, submit_flags),
            execution_timeout_minutes,
        })
    }

    /// Application the run is started in
    pub fn application_id(&self) -> &str {
        &self.application_id
    }

    /// Idempotency token for the start call
    pub fn client_token(&self) -> Uuid {
        self.client_token
    }

    /// Role the run executes under
    pub fn execution_role_arn(&self) -> &str {
        &self.execution_role_arn
    }

    /// Display name of the run
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Jar the driver starts from
    pub fn entry_point(&self) -> &str {
        self.entry_point
    }

    /// Translated job arguments, in order
    pub fn entry_point_arguments(&self) -> &[String] {
        &self.entry_point_arguments
    }

    /// Full spark-submit parameter string
    pub fn spark_submit_parameters(&self) -> &str {
        &self.spark_submit_parameters
    }

    /// Service-side timeout, when one was given
    pub fn execution_timeout_minutes(&self) -> Option<i64> {
        self.execution_timeout_minutes
    }
}

/// Response to a start request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub application_id: String,
    pub job_run_id: String,
    pub arn: String,
}

impl SubmissionResponse {
    /// Handle used for status queries
    pub fn run_handle(&self) -> RunHandle {
        RunHandle::new(self.job_run_id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValidationError;
    use serde_json::json;

    fn metadata() -> JobMetadata {
        JobMetadata {
            name: Some("delta_streamer_invoice".to_string()),
            application_id: Some("00fabc123".to_string()),
            execution_role_arn: Some("arn:aws:iam::123456789012:role/Runtime".to_string()),
            execution_timeout_minutes: Some(600),
            ..Default::default()
        }
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_submit_parameters_start_with_libraries() {
        let libraries = strings(&["s3://bucket/a.jar", "s3://bucket/b.jar"]);
        let flags = strings(&[
            "--conf spark.jars=s3://other/override.jar",
            "--class org.apache.hudi.utilities.streamer.HoodieStreamer",
        ]);

        let params = spark_submit_parameters(&libraries, &flags);
        assert!(params.starts_with("--conf spark.jars=s3://bucket/a.jar,s3://bucket/b.jar "));
        assert_eq!(
            params,
            "--conf spark.jars=s3://bucket/a.jar,s3://bucket/b.jar \
             --conf spark.jars=s3://other/override.jar \
             --class org.apache.hudi.utilities.streamer.HoodieStreamer"
        );
    }

    #[test]
    fn test_empty_libraries_give_empty_jars_flag() {
        let params = spark_submit_parameters(&[], &strings(&["--class Main"]));
        assert_eq!(params, "--conf spark.jars= --class Main");
    }

    #[test]
    fn test_build_copies_metadata() {
        let request = SubmissionRequest::build(
            &strings(&["s3://bucket/a.jar"]),
            &[],
            strings(&["--op", "UPSERT"]),
            &metadata(),
        )
        .unwrap();

        assert_eq!(request.application_id(), "00fabc123");
        assert_eq!(request.execution_role_arn(), "arn:aws:iam::123456789012:role/Runtime");
        assert_eq!(request.name(), "delta_streamer_invoice");
        assert_eq!(request.entry_point(), SPARK_EXAMPLES_ENTRY_POINT);
        assert_eq!(request.entry_point_arguments(), ["--op", "UPSERT"]);
        assert_eq!(request.execution_timeout_minutes(), Some(600));
        assert!(request.spark_submit_parameters().starts_with("--conf spark.jars=s3://bucket/a.jar"));
    }

    #[test]
    fn test_build_keeps_metadata_verbatim() {
        let mut job = metadata();
        job.name = Some(" invoice ".to_string());
        job.application_id = Some(" app\n".to_string());

        let request = SubmissionRequest::build(&[], &[], vec![], &job).unwrap();
        assert_eq!(request.name(), " invoice ");
        assert_eq!(request.application_id(), " app\n");
    }

    #[test]
    fn test_client_token_is_fresh_per_build() {
        let first = SubmissionRequest::build(&[], &[], vec![], &metadata()).unwrap();
        let second = SubmissionRequest::build(&[], &[], vec![], &metadata()).unwrap();
        assert_ne!(first.client_token(), second.client_token());
    }

    #[test]
    fn test_missing_mandatory_fields() {
        let mut job = metadata();
        job.application_id = None;
        assert_eq!(
            SubmissionRequest::build(&[], &[], vec![], &job).unwrap_err(),
            ValidationError::MissingField("ApplicationId")
        );

        let mut job = metadata();
        job.execution_role_arn = Some(String::new());
        assert_eq!(
            SubmissionRequest::build(&[], &[], vec![], &job).unwrap_err(),
            ValidationError::MissingField("ExecutionArn")
        );

        let mut job = metadata();
        job.name = None;
        assert_eq!(
            SubmissionRequest::build(&[], &[], vec![], &job).unwrap_err(),
            ValidationError::MissingField("job_name")
        );
    }

    #[test]
    fn test_from_description() {
        let description = JobDescription::from_value(json!({
            "jar": ["s3://bucket/a.jar"],
            "arguments": { "table-type": "COPY_ON_WRITE", "enable-sync": false },
            "job": {
                "job_name": "invoice",
                "ApplicationId": "app",
                "ExecutionArn": "role"
            }
        }))
        .unwrap();

        let request = SubmissionRequest::from_description(&description).unwrap();
        assert_eq!(request.entry_point_arguments(), ["--table-type", "COPY_ON_WRITE"]);
        assert_eq!(request.execution_timeout_minutes(), None);
        assert_eq!(request.spark_submit_parameters(), "--conf spark.jars=s3://bucket/a.jar ");
    }

    #[test]
    fn test_response_wire_format() {
        let response: SubmissionResponse = serde_json::from_value(json!({
            "applicationId": "app",
            "jobRunId": "run-1",
            "arn": "arn:aws:emr-serverless:us-east-1:123456789012:/applications/app/jobruns/run-1"
        }))
        .unwrap();

        assert_eq!(response.run_handle(), RunHandle::new("run-1"));
        assert_eq!(serde_json::to_value(&response).unwrap()["jobRunId"], "run-1");
    }
}
