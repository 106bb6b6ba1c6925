//! Process-level invocation
//!
//! Reads the job description, connects to the execution service and hands
//! the request to a [`JobHandler`]. Every failure along the way, including
//! the ones that happen before a handler exists, ends in a failure
//! [`Envelope`].

use std::future::Future;
use std::io::Read;
use std::sync::Arc;

use sparklet_client::JobClient;
use tracing::error;

use crate::error::HandlerError;
use crate::scheduler::PollSettings;
use crate::service::envelope::Envelope;
use crate::service::handler::JobHandler;

/// Event origin that reads the job description from stdin
pub const STDIN_EVENT: &str = "-";

/// Reads the job description from a file, or from stdin for [`STDIN_EVENT`]
pub fn read_event(origin: &str) -> Result<String, HandlerError> {
    if origin == STDIN_EVENT {
        let mut text = String::new();
        return std::io::stdin()
            .read_to_string(&mut text)
            .map(|_| text)
            .map_err(|source| HandlerError::Input {
                origin: "stdin".to_string(),
                source,
            });
    }

    std::fs::read_to_string(origin).map_err(|source| HandlerError::Input {
        origin: origin.to_string(),
        source,
    })
}

/// Runs one invocation end to end
///
/// `connect` is only awaited once the event has been read.
pub async fn invoke<F, Fut>(origin: &str, settings: PollSettings, connect: F) -> Envelope
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = sparklet_client::Result<Arc<dyn JobClient>>>,
{
    let event = match read_event(origin) {
        Ok(event) => event,
        Err(e) => return reject(e),
    };

    let client = match connect().await {
        Ok(client) => client,
        Err(e) => return reject(HandlerError::from(e)),
    };

    JobHandler::new(client, settings).handle_json(&event).await
}

fn reject(err: HandlerError) -> Envelope {
    error!("An error occurred: {}", err);
    Envelope::failure(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedJobClient;
    use serde_json::Value;
    use sparklet_client::{ClientConfig, ClientError, EmrServerlessClient};
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    const EVENT: &str = r#"{
        "jar": ["s3://bucket/jar/app.jar"],
        "arguments": { "op": "UPSERT" },
        "job": {
            "job_name": "invoice",
            "ApplicationId": "00fabc123",
            "ExecutionArn": "arn:aws:iam::123456789012:role/Runtime"
        }
    }"#;

    fn settings() -> PollSettings {
        PollSettings {
            interval: Duration::from_millis(1),
            max_wait: None,
        }
    }

    fn event_file(name: &str) -> PathBuf {
        let path =
            std::env::temp_dir().join(format!("sparklet-{}-{name}.json", std::process::id()));
        std::fs::write(&path, EVENT).unwrap();
        path
    }

    fn error_message(envelope: &Envelope) -> String {
        let body: Value = serde_json::from_str(&envelope.body).unwrap();
        body["error"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_unreadable_event_is_enveloped() {
        let connected = AtomicBool::new(false);
        let flag = &connected;
        let envelope = invoke("/nonexistent/sparklet-event.json", settings(), move || async move {
            flag.store(true, Ordering::SeqCst);
            Ok::<_, ClientError>(Arc::new(ScriptedJobClient::new()) as Arc<dyn JobClient>)
        })
        .await;

        assert_eq!(envelope.status_code, 500);
        assert!(
            error_message(&envelope)
                .starts_with("Failed to read job description from /nonexistent/sparklet-event.json")
        );
        assert!(!connected.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_unpaired_credentials_are_enveloped() {
        let path = event_file("unpaired");
        let config = ClientConfig {
            access_key_id: Some("AKIA".to_string()),
            ..ClientConfig::default()
        };

        let envelope = invoke(path.to_str().unwrap(), settings(), || async move {
            EmrServerlessClient::new(config)
                .await
                .map(|client| Arc::new(client) as Arc<dyn JobClient>)
        })
        .await;
        std::fs::remove_file(&path).unwrap();

        assert_eq!(envelope.status_code, 500);
        assert_eq!(
            error_message(&envelope),
            "Invalid client configuration: access key id given without a secret access key"
        );
    }

    #[tokio::test]
    async fn test_connect_failure_is_enveloped() {
        let path = event_file("connect");
        let envelope = invoke(path.to_str().unwrap(), settings(), || async {
            Err::<Arc<dyn JobClient>, _>(ClientError::Config("no region".to_string()))
        })
        .await;
        std::fs::remove_file(&path).unwrap();

        assert!(!envelope.is_success());
        assert_eq!(
            error_message(&envelope),
            "Invalid client configuration: no region"
        );
    }

    #[tokio::test]
    async fn test_event_file_is_submitted() {
        let path = event_file("submit");
        let client = Arc::new(ScriptedJobClient::new());
        let connect_to = Arc::clone(&client);

        let envelope = invoke(path.to_str().unwrap(), settings(), || async move {
            Ok::<_, ClientError>(connect_to as Arc<dyn JobClient>)
        })
        .await;
        std::fs::remove_file(&path).unwrap();

        assert!(envelope.is_success());
        assert_eq!(client.submit_calls(), 1);
        assert_eq!(client.submitted()[0].name(), "invoice");
    }
}
