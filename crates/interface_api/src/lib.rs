//! HTTP API Layer
//!
//! This crate provides the intake HTTP endpoint using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: the intake submission handler and health checks
//! - **Middleware**: request logging
//! - **DTOs**: response bodies with the fixed `{ok, id, contactId, error}`
//!   envelope
//! - **Error Handling**: one discriminated error type mapped to fixed
//!   status codes at the boundary
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, config::ApiConfig};
//!
//! let app = create_router(pool, crm, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_intake::ContactSync;
use infra_db::{DatabasePool, SubmissionRepository};

use crate::config::ApiConfig;
use crate::handlers::{health, intake};
use crate::middleware::request_log_middleware;

/// Application state shared across handlers
///
/// The CRM port is optional: when the credentials are not configured the
/// intake handler answers with the operating-configuration error instead of
/// attempting a sync.
#[derive(Clone)]
pub struct AppState {
    pub pool: DatabasePool,
    pub repo: SubmissionRepository,
    pub crm: Option<Arc<dyn ContactSync>>,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `pool` - Database connection pool (migrations already applied)
/// * `crm` - Contact sync port, or `None` when credentials are missing
/// * `config` - API configuration
pub fn create_router(
    pool: DatabasePool,
    crm: Option<Arc<dyn ContactSync>>,
    config: ApiConfig,
) -> Router {
    let state = AppState {
        repo: SubmissionRepository::new(pool.clone()),
        pool,
        crm,
        config,
    };

    // Public routes (no request logging beyond the trace layer)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let api_routes = Router::new()
        .route("/intake", post(intake::submit_intake))
        .layer(axum_middleware::from_fn(request_log_middleware));

    Router::new()
        .merge(public_routes)
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
