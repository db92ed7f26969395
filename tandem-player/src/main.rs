//! Tandem Player (tandem-player) - Main entry point
//!
//! Starts the shared virtual player: broadcaster, tick source, and the
//! HTTP/WebSocket server.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tandem_common::PlayerConfig;
use tandem_player::api::{self, AppContext};
use tandem_player::playback::{PlayerService, TickSource};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for tandem-player
#[derive(Parser, Debug)]
#[command(name = "tandem-player")]
#[command(about = "Shared real-time audio player state service")]
#[command(version)]
struct Args {
    /// Port to listen on [default: 8080]
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Track length in seconds [default: 180]
    #[arg(short, long, env = "TANDEM_DURATION")]
    duration: Option<u32>,

    /// Optional TOML configuration file
    #[arg(short, long, env = "TANDEM_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = PlayerConfig::load_or_default(args.config.as_deref())
        .context("Failed to load configuration")?
        .with_overrides(args.port, args.duration);
    config.validate().context("Invalid configuration")?;

    // Initialize tracing
    let level = &config.logging.level;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("tandem_player={level},tower_http={level}").into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Tandem Player v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    if let Some(path) = &args.config {
        info!("Configuration file: {}", path.display());
    }
    info!(
        "Track length {}s, tick every {:?}, heartbeat {}",
        config.duration_secs,
        config.tick_interval(),
        if config.heartbeat { "on" } else { "off" }
    );

    let service = Arc::new(PlayerService::new(&config));
    let _ticker = TickSource::spawn(Arc::clone(&service), config.tick_interval());

    let ctx = AppContext::new(service, config.write_timeout());
    api::run(config.port, ctx, shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
