//! Alertrix - Matrix notification dispatcher
//!
//! One-shot command-line front end: loads the provider configuration,
//! reads an alert event from a JSON file, and sends it to the resolved
//! Matrix room.

use alertrix::{
    cli::Cli, config::MatrixProviderConfig, core::AlertEvent, notification::MatrixNotifier,
    transport::HttpTransport,
};
use anyhow::{bail, Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = MatrixProviderConfig::load(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;
    // Refuse to send with a broken provider rather than failing mid-dispatch.
    if !config.is_valid() {
        bail!(
            "invalid Matrix provider configuration: the default and every override \
             need an access token and room id, and override groups must be unique"
        );
    }

    let raw_event = std::fs::read_to_string(&cli.event)
        .with_context(|| format!("failed to read alert event from {}", cli.event.display()))?;
    let event: AlertEvent =
        serde_json::from_str(&raw_event).context("failed to parse alert event JSON")?;

    info!(
        endpoint = %event.display_name,
        group = %event.group,
        resolved = cli.resolved,
        "Dispatching alert to Matrix"
    );

    let transport = Arc::new(HttpTransport::new(reqwest::Client::new()));
    let notifier = MatrixNotifier::new(config, transport);
    notifier.send(&event, cli.resolved).await?;

    Ok(())
}
