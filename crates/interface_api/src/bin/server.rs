//! Lecturer Claims - API Server Binary
//!
//! This binary starts the HTTP API server for the claims workflow.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin claims-api
//!
//! # Run with environment variables
//! API_PORT=9000 API_UPLOAD_DIR=/var/lib/claims cargo run --bin claims-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_UPLOAD_DIR` - Directory for supporting documents (default: uploads)
//! * `API_MAX_UPLOAD_BYTES` - Largest accepted file (default: 5242880)
//! * `API_ALLOWED_EXTENSIONS` - Comma separated extensions (default: pdf,docx,xlsx)
//! * `API_SEED_SAMPLE_DATA` - Load demonstration claims (default: true)

use std::net::SocketAddr;

use anyhow::Context;
use interface_api::{create_router, config::ApiConfig, AppState};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration, seeds sample data when enabled,
/// and starts the HTTP server.
///
/// # Errors
///
/// Returns an error if:
/// - The configured address is invalid
/// - Sample data cannot be built
/// - Server fails to bind to the configured address
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    // Load configuration from environment
    let (config, config_error) = load_config();

    // Initialize tracing/logging
    init_tracing(&config.log_level);

    if let Some(err) = config_error {
        tracing::warn!(error = %err, "Invalid API_ configuration, using defaults");
    }

    tracing::info!(
        host = %config.host,
        port = %config.port,
        upload_dir = %config.upload_dir.display(),
        "Starting Lecturer Claims API Server"
    );

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("Invalid server address {}", config.server_addr()))?;

    let state = AppState::new(config.clone());

    if config.seed_sample_data {
        let inserted = state
            .store
            .seed_sample_data()
            .context("Failed to build sample claims")?;
        tracing::info!(inserted, "Sample data ready");
    }

    // Create the API router
    let app = create_router(state);

    tracing::info!(%addr, "Server listening");

    // Create TCP listener and serve
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Loads API configuration from environment variables.
///
/// Falls back to defaults when the environment cannot be parsed; the
/// error is handed back so it can be logged once tracing is up.
fn load_config() -> (ApiConfig, Option<config::ConfigError>) {
    match ApiConfig::from_env() {
        Ok(config) => (config, None),
        Err(err) => (ApiConfig::default(), Some(err)),
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// # Arguments
///
/// * `log_level` - The minimum log level to output (trace, debug, info, warn, error)
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// This enables graceful shutdown of the server, allowing in-flight
/// requests to complete before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
