//! EMR Serverless binding
//!
//! Maps submission requests onto `StartJobRun` and status queries onto
//! `GetJobRun`.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_emrserverless::Client;
use aws_sdk_emrserverless::config::{Credentials, Region};
use aws_sdk_emrserverless::error::DisplayErrorContext;
use aws_sdk_emrserverless::types::{JobDriver, JobRunState, SparkSubmit};
use sparklet_core::domain::run::{RunHandle, RunState};
use sparklet_core::dto::submission::{SubmissionRequest, SubmissionResponse};
use tracing::{debug, info};

use crate::JobClient;
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

const CREDENTIALS_PROVIDER_NAME: &str = "sparklet-static";

/// Job client backed by AWS EMR Serverless
#[derive(Debug, Clone)]
pub struct EmrServerlessClient {
    client: Client,
}

impl EmrServerlessClient {
    /// Create a client from explicit configuration
    ///
    /// Static keys and region override the default provider chain when set.
    pub async fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }

        if let Some((key_id, secret)) = config.static_credentials() {
            loader = loader.credentials_provider(Credentials::new(
                key_id,
                secret,
                None,
                None,
                CREDENTIALS_PROVIDER_NAME,
            ));
        }

        let sdk_config = loader.load().await;
        info!(
            region = ?sdk_config.region().map(|region| region.as_ref().to_string()),
            static_credentials = config.static_credentials().is_some(),
            "EMR Serverless client initialized"
        );

        Ok(Self::with_client(Client::new(&sdk_config)))
    }

    /// Create a client around a preconfigured SDK client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl JobClient for EmrServerlessClient {
    async fn submit(&self, request: &SubmissionRequest) -> Result<SubmissionResponse> {
        debug!(
            application_id = request.application_id(),
            client_token = %request.client_token(),
            "Calling StartJobRun"
        );

        let output = self
            .client
            .start_job_run()
            .application_id(request.application_id())
            .client_token(request.client_token().to_string())
            .execution_role_arn(request.execution_role_arn())
            .name(request.name())
            .job_driver(job_driver(request)?)
            .set_execution_timeout_minutes(request.execution_timeout_minutes())
            .send()
            .await
            .map_err(|e| ClientError::Submission(DisplayErrorContext(&e).to_string()))?;

        Ok(SubmissionResponse {
            application_id: output.application_id().to_string(),
            job_run_id: output.job_run_id().to_string(),
            arn: output.arn().to_string(),
        })
    }

    async fn get_state(&self, application_id: &str, run: &RunHandle) -> Result<RunState> {
        let output = self
            .client
            .get_job_run()
            .application_id(application_id)
            .job_run_id(run.as_str())
            .send()
            .await
            .map_err(|e| ClientError::query(run.as_str(), DisplayErrorContext(&e).to_string()))?;

        let job_run = output.job_run().ok_or(ClientError::MissingField("jobRun"))?;

        Ok(run_state(job_run.state()))
    }
}

/// Builds the spark-submit job driver for a request
fn job_driver(request: &SubmissionRequest) -> Result<JobDriver> {
    let spark_submit = SparkSubmit::builder()
        .entry_point(request.entry_point())
        .set_entry_point_arguments(Some(request.entry_point_arguments().to_vec()))
        .spark_submit_parameters(request.spark_submit_parameters())
        .build()
        .map_err(|e| ClientError::Submission(format!("Invalid job driver: {}", e)))?;

    Ok(JobDriver::SparkSubmit(spark_submit))
}

fn run_state(state: &JobRunState) -> RunState {
    RunState::from(state.as_str())
}
