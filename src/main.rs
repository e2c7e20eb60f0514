//! Index registry service entrypoint

use anyhow::Result;
use clap::Parser;
use index_registry::api;
use index_registry::config::ServiceConfig;
use index_registry::engine::RebalanceEngine;
use std::sync::Arc;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "index-registry")]
#[command(about = "In-memory equity index registry")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "index-registry.toml")]
    config: String,

    /// Override log level
    #[arg(long)]
    log_level: Option<String>,

    /// Dry run mode (validate config and exit)
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = if std::path::Path::new(&cli.config).exists() {
        ServiceConfig::from_file(&cli.config)?
    } else {
        ServiceConfig::default()
    };

    // Override log level if provided
    if let Some(log_level) = cli.log_level {
        config.monitoring.log_level = log_level;
    }
    config.validate_settings()?;

    init_logging(&config);

    info!("Starting index registry service");
    info!("API bind address: {}", config.api.bind_address);

    if cli.dry_run {
        info!("Dry run mode - configuration is valid, exiting");
        return Ok(());
    }

    let engine = Arc::new(RebalanceEngine::new());
    let api_server = api::start_server(engine, &config.api).await?;

    info!("Index registry started. Press Ctrl+C to shutdown.");
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Received shutdown signal");
        }
        _ = api_server => {
            info!("API server finished");
        }
    }

    info!("Shutting down index registry service");
    Ok(())
}

fn init_logging(config: &ServiceConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "index_registry={},tower_http=info",
            config.monitoring.log_level
        )
        .into()
    });

    if config.monitoring.structured_logging {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
