//! Claim Settlement Network - API Server Binary
//!
//! This binary deploys an in-process settlement network and serves it over
//! HTTP.
//!
//! # Usage
//!
//! ```bash
//! # Run with an explicit authority
//! API_AUTHORITY=IDN-5f0c... cargo run --bin claims-api
//!
//! # Override network settings
//! API_AUTHORITY=... API_NETWORK__UNIT=250 API_NETWORK__TRANSFER_FAILURE=unwind cargo run --bin claims-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_JWT_SECRET` - JWT signing secret (required in production)
//! * `API_JWT_EXPIRATION_SECS` - JWT token expiration in seconds (default: 3600)
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_AUTHORITY` - Identity that owns the services (required)
//! * `API_NETWORK__CURRENCY` - Network currency (default: USD)
//! * `API_NETWORK__UNIT` - Assessment unit in major currency units (default: 100)
//! * `API_NETWORK__TRANSFER_FAILURE` - `retain_paid_mark` or `unwind`
//! * `API_NETWORK__GARAGE_ENABLED` - Deploy the garage service (default: true)
//! * `API_NETWORK__COMPLETION_GUARD` - `open` or `authority`

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use claims_network::{ClaimsNetwork, InMemoryRail};
use interface_api::{config::ApiConfig, create_router};

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration, deploys the network, and starts
/// the HTTP server.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration cannot be loaded from environment
/// - No valid authority identity is configured
/// - Server fails to bind to the configured address
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("failed to load API configuration")?;

    init_tracing(&config.log_level);

    let authority = config
        .authority_identity()
        .context("API_AUTHORITY is not a valid identity")?
        .context("API_AUTHORITY must be set")?;

    tracing::info!(
        host = %config.host,
        port = %config.port,
        authority = %authority,
        "Starting claim settlement API server"
    );

    let rail = Arc::new(InMemoryRail::new());
    let network = ClaimsNetwork::deploy(config.network.clone(), authority, rail)
        .await
        .context("failed to deploy the settlement network")?;

    let app = create_router(Arc::new(network), config.clone());

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .context("invalid server address")?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
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
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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
