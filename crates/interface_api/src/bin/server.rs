//! Lead Intake Core - API Server Binary
//!
//! This binary starts the HTTP intake server.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin intake-api
//!
//! # Run with environment variables
//! INTAKE_HOST=0.0.0.0 INTAKE_PORT=8080 GHL_API_KEY=... cargo run --bin intake-api
//! ```
//!
//! # Environment Variables
//!
//! * `INTAKE_HOST` - Server host (default: 0.0.0.0)
//! * `INTAKE_PORT` - Server port (default: 8080)
//! * `DATABASE_URL` / `INTAKE_DATABASE_URL` - SQLite connection string
//! * `GHL_API_KEY` - GoHighLevel bearer credential
//! * `GHL_LOCATION_ID` - GoHighLevel location for created contacts
//! * `GHL_API_BASE` - Override for the contact API base URL (optional)
//! * `INTAKE_SYNC_TIMEOUT_SECS` - Bound on the outbound sync call (default: 20)
//! * `INTAKE_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domain_intake::ContactSync;
use infra_crm::GhlClient;
use infra_db::{create_pool, run_migrations, DatabaseConfig};
use interface_api::{config::ApiConfig, create_router};

/// Main entry point for the intake server.
///
/// Initializes logging, loads configuration, establishes the database pool,
/// applies migrations, and starts the HTTP server.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration cannot be loaded from environment
/// - The database pool cannot be created or migrated
/// - The server fails to bind to the configured address
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    // Load configuration from environment
    let config = load_config();

    // Initialize tracing/logging
    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        "Starting Lead Intake Core API Server"
    );

    // Create database connection pool and apply migrations
    let pool = create_pool(DatabaseConfig::new(config.database_url.as_str())).await?;
    run_migrations(&pool).await?;

    // Build the CRM port; the intake endpoint answers 500 without it
    let crm: Option<Arc<dyn ContactSync>> = match config.ghl_config() {
        Some(ghl) => Some(Arc::new(GhlClient::new(ghl))),
        None => {
            tracing::warn!(
                "GHL_API_KEY / GHL_LOCATION_ID not configured; intake requests will be refused"
            );
            None
        }
    };

    // Create the API router
    let app = create_router(pool, crm, config.clone());

    // Parse server address
    let addr: SocketAddr = config.server_addr().parse()?;

    tracing::info!(%addr, "Server listening");

    // Create TCP listener and serve
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Loads API configuration from environment variables.
///
/// Falls back to individual environment variables and defaults when the
/// prefixed form is not set.
fn load_config() -> ApiConfig {
    ApiConfig::from_env().unwrap_or_else(|_| ApiConfig {
        host: std::env::var("INTAKE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
        port: std::env::var("INTAKE_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080),
        database_url: std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("INTAKE_DATABASE_URL"))
            .unwrap_or_else(|_| "sqlite://intake.db".to_string()),
        ghl_api_key: std::env::var("GHL_API_KEY").ok(),
        ghl_location_id: std::env::var("GHL_LOCATION_ID").ok(),
        ghl_api_base: std::env::var("GHL_API_BASE").ok(),
        sync_timeout_secs: std::env::var("INTAKE_SYNC_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(20),
        log_level: std::env::var("INTAKE_LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "info".to_string()),
    })
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
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
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
