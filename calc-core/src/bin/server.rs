//! Calculator service binary
//!
//! Boots the service, drains notifications to structured logs, and exposes
//! the call surface to whatever host wiring sits in front of it.

use calc_core::{CalculatorService, Config};
use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting CalcRail calculator server");

    // Load configuration: explicit file wins, then environment overrides
    let config = match std::env::var("CALC_CONFIG") {
        Ok(path) => Config::from_file(&path).with_context(|| format!("loading {}", path))?,
        Err(_) => Config::from_env().context("loading config from environment")?,
    };

    let service = CalculatorService::open(config);
    tracing::info!(
        service = %service.config().service_name,
        version = %service.config().service_version,
        "calculator service opened"
    );

    // Dispatcher: drain notifications to the log stream observers tail
    let mut notifications = service
        .notifications()
        .context("notification stream already claimed")?;
    let dispatcher = tokio::spawn(async move {
        while let Some(notification) = notifications.recv().await {
            tracing::info!(
                event = notification.event_name(),
                payload = %notification,
                "notification"
            );
        }
    });

    tokio::signal::ctrl_c().await?;

    tracing::info!("Shutting down calculator server");
    service.shutdown().await?;
    dispatcher.await?;
    Ok(())
}
