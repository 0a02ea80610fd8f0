//! YouTube Transcript Server
//!
//! A small HTTP service that fetches YouTube transcripts and serves them as
//! JSON or as SRT subtitle text.
//!
//! Usage:
//!
//! ```text
//! transcript-server [config.toml]
//! transcript-server --write-config [config.toml]
//! ```

#![allow(dead_code)]

mod config;
mod config_file;
mod error;
mod http;
#[cfg(test)]
mod integration;
mod limits;
mod metrics;
mod state;
mod subtitle;
mod transcript;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;
use crate::config_file::{generate_default_config, load_server_config};
use crate::error::{Result, ServerError};
use crate::http::create_router;
use crate::state::AppState;
use crate::transcript::YouTubeSource;

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
const APP_NAME: &str = "transcript-server";

/// Default configuration file path
const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Rate-limit buckets idle this long are dropped
const RATE_LIMIT_IDLE: Duration = Duration::from_secs(300);

#[tokio::main]
async fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let first = args.next();

    if first.as_deref() == Some("--write-config") {
        let path = args
            .next()
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
        generate_default_config(&path).map_err(|e| ServerError::Config(e.to_string()))?;
        println!("Wrote default configuration to {}", path);
        return Ok(());
    }

    // Load configuration
    let config_path = first.unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let (config, config_warning) = load_server_config(&config_path);

    // Initialize logging
    init_logging(&config);

    tracing::info!("{} v{} starting", APP_NAME, VERSION);
    if let Some(warning) = config_warning {
        tracing::warn!("{}", warning);
    }
    tracing::info!("Configuration loaded: {:?}", config);

    // Create application state
    let source = YouTubeSource::new().map_err(|e| ServerError::Internal(e.to_string()))?;
    let state = Arc::new(AppState::new(config.clone(), Arc::new(source)));

    // Background task: drop idle rate-limit buckets every 60 seconds.
    if state.rate_limiter.is_some() {
        let state_bg = Arc::clone(&state);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(60));
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                let removed = state_bg.cleanup_rate_limits(RATE_LIMIT_IDLE);
                if removed > 0 {
                    tracing::debug!("Dropped {} idle rate-limit bucket(s)", removed);
                }
            }
        });
    }

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.socket_addr()).await?;
    tracing::info!("Starting HTTP server on {}", listener.local_addr()?);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Initialize logging with tracing
fn init_logging(config: &ServerConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "transcript_server={},tower_http={}",
            config.log_level, config.log_level
        )
        .into()
    });

    let json = config.json_logs();
    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(|| tracing_subscriber::fmt::layer()))
        .init();
}

/// Resolve when the process receives Ctrl-C
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
