//! Predictdash Server
//!
//! Run with: cargo run --bin predictdash
//!
//! # Configuration
//!
//! Settings come from `--config`, else the first of
//! `~/.config/predictdash/config.toml`, `/etc/predictdash/config.toml` and
//! `./config.toml`, else defaults. `PREDICTDASH_*` environment variables
//! override the file, and command-line flags override both.
//!
//! `RUST_LOG` takes precedence over `[logging] level`.

use anyhow::Context;
use clap::Parser;
use predictdash::api::{serve, AppState};
use predictdash::config::{Config, LoggingConfig};
use predictdash::prediction::PredictionClient;
use predictdash::session::Session;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "predictdash")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Prediction dashboard API server")]
struct Args {
    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Prediction endpoint URL
    #[arg(short, long)]
    endpoint: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut source = args.config.clone();
    let mut rejected = Vec::new();
    let mut config = match &args.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => {
            let loaded = Config::load_default();
            source = loaded.source;
            rejected = loaded.rejected;
            loaded.config
        }
    };

    if let Some(host) = args.host {
        config.api.host = host;
    }
    if let Some(port) = args.port {
        config.api.port = port;
    }
    if let Some(endpoint) = args.endpoint {
        config.endpoint.url = endpoint;
    }

    init_tracing(&config.logging);

    tracing::info!("Starting Predictdash v{}", env!("CARGO_PKG_VERSION"));
    for error in &rejected {
        tracing::warn!("Skipped config file: {}", error);
    }
    match &source {
        Some(path) => tracing::info!("Loaded config from {:?}", path),
        None => tracing::info!("Using default config with environment overrides"),
    }
    tracing::info!(endpoint = %config.endpoint.url, "Prediction endpoint");
    tracing::info!(
        loading_delay_ms = config.endpoint.loading_delay_ms,
        request_timeout_secs = ?config.endpoint.request_timeout_secs,
        "Session settings"
    );

    let client = PredictionClient::new(config.endpoint.prediction_config())
        .context("Failed to build prediction client")?;
    let session = Session::new(Arc::new(client), config.endpoint.session_config());

    let state = AppState::new(session, config.endpoint.url.clone(), config.api.clone());
    serve(state).await.context("API server failed")?;

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "predictdash={level},tower_http={level}",
            level = logging.level
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);
    if logging.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
