//! # Conductor - JSON-RPC control plane for a sequencer conductor
//!
//! Exposes leadership state, cluster membership and unsafe payload
//! commitment of a conductor to operators and peer services.
//!
//! ## Architecture
//! ```text
//! JSON-RPC client → HTTP (axum) → ApiBackend → Conductor
//!                                                  ↓
//!                                          consensus engine
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod conductor;
mod config;
mod routes;
mod rpc;
mod state;

use conductor::StandaloneConductor;
use config::AppConfig;
use rpc::ApiBackend;
use state::AppState;

/// Conductor - JSON-RPC control plane
#[derive(Parser, Debug)]
#[command(name = "conductor")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/conductor.toml")]
    config: String,

    /// Listen address (overrides config)
    #[arg(short, long, env = "CONDUCTOR_LISTEN_ADDR")]
    listen: Option<String>,

    /// Server ID within the cluster (overrides config)
    #[arg(long, env = "CONDUCTOR_SERVER_ID")]
    server_id: Option<String>,

    /// Advertised consensus address (overrides config)
    #[arg(long, env = "CONDUCTOR_SERVER_ADDR")]
    server_addr: Option<String>,

    /// Start with the conductor paused
    #[arg(long, default_value = "false")]
    paused: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "LOG_LEVEL")]
    log_level: String,

    /// Enable JSON logging output
    #[arg(long, default_value = "false")]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up a local .env before clap reads env fallbacks
    dotenvy::dotenv().ok();

    let args = Args::parse();

    init_logging(&args.log_level, args.json_logs)?;

    info!("Starting conductor v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load(&args.config, &args)?;
    info!(path = %args.config, "Configuration loaded");

    let conductor = Arc::new(StandaloneConductor::new(
        config.server_id.clone(),
        config.server_addr.clone(),
        config.start_paused,
    ));
    info!(
        server_id = %conductor.server_id(),
        server_addr = %config.server_addr,
        paused = config.start_paused,
        "Conductor bootstrapped"
    );

    let api_log = tracing::info_span!("conductor_api", server_id = %config.server_id);
    let api = Arc::new(ApiBackend::new(api_log, conductor.clone()));

    let state = AppState::new(config.clone(), api);
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;
    info!(addr = %config.listen_addr, "JSON-RPC listening");

    // Stop the conductor as soon as shutdown begins so in-flight calls see it
    let shutdown_conductor = conductor.clone();
    let shutdown_signal = async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        }
        info!("Shutdown signal received");
        shutdown_conductor.stop();
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .context("Server error")?;

    if let Some(head) = conductor.unsafe_head().await {
        info!(
            block_number = %head.payload.block_number,
            block_hash = %head.payload.block_hash,
            committed_at = head.committed_at,
            "Last committed unsafe head"
        );
    }

    info!("Conductor shutdown complete");
    Ok(())
}

/// Initialize structured logging with tracing
fn init_logging(level: &str, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_thread_ids(true))
            .init();
    }

    Ok(())
}
