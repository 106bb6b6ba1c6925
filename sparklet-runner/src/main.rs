//! Sparklet
//!
//! Reads one job description, submits it to EMR Serverless and prints the
//! response envelope on stdout. Logs go to stderr.
//!
//! Only invalid flags or runner settings end the process without an
//! envelope; reading the event and setting up the client answer with a
//! failure envelope like any other request error.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use sparklet_client::{ClientConfig, EmrServerlessClient, JobClient};
use sparklet_runner::{Config, invoke};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sparklet")]
#[command(about = "Submit a Spark job to EMR Serverless", long_about = None)]
struct Cli {
    /// Job description JSON file, `-` reads stdin
    #[arg(default_value = "-")]
    event: String,

    /// AWS region (overrides DEV_REGION)
    #[arg(long)]
    region: Option<String>,

    /// Seconds between status queries (overrides POLL_INTERVAL)
    #[arg(long)]
    poll_interval: Option<u64>,

    /// Stop waiting for the run after this many seconds (overrides MAX_POLL_WAIT)
    #[arg(long)]
    max_poll_wait: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "sparklet=info,sparklet_runner=info,sparklet_client=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = load_config(&cli)?;
    let client_config = client_config(&cli);
    info!(
        "Loaded configuration: poll_interval={:?}, max_poll_wait={:?}",
        config.poll.interval, config.poll.max_wait
    );

    let envelope = invoke(&cli.event, config.poll, || async move {
        EmrServerlessClient::new(client_config)
            .await
            .map(|client| Arc::new(client) as Arc<dyn JobClient>)
    })
    .await;
    println!("{}", serde_json::to_string(&envelope)?);

    Ok(if envelope.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Loads runner configuration from the environment, then applies flags
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::from_env();

    if let Some(seconds) = cli.poll_interval {
        config = config.with_poll_interval(seconds);
    }
    if let Some(seconds) = cli.max_poll_wait {
        config = config.with_max_poll_wait(seconds);
    }

    config.validate()?;
    Ok(config)
}

/// Client settings from the environment, with the region flag applied
///
/// Validated when the client is built.
fn client_config(cli: &Cli) -> ClientConfig {
    let mut config = ClientConfig::from_env();

    if let Some(region) = &cli.region {
        config.region = Some(region.clone());
    }

    config
}
