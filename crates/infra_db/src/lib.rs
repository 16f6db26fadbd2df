//! Infrastructure Database Layer
//!
//! This crate provides the durable store for intake submissions on SQLite
//! using SQLx.
//!
//! # Store-first semantics
//!
//! The repository exposes exactly the two writes the intake flow needs:
//! a single-row insert that must succeed before any external call is
//! attempted, and a single-row update that records the sync outcome
//! afterwards. Rows are never deleted and no multi-row transactions are
//! required; each request owns exactly one row by its generated identifier.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig, SubmissionRepository};
//!
//! let pool = create_pool(DatabaseConfig::new("sqlite://intake.db")).await?;
//! run_migrations(&pool).await?;
//! let repo = SubmissionRepository::new(pool);
//! ```

pub mod error;
pub mod pool;
pub mod repositories;

pub use error::DatabaseError;
pub use pool::{create_pool, create_pool_from_url, DatabaseConfig, DatabasePool};
pub use repositories::submission::{SubmissionRepository, SubmissionRow};

/// Applies the embedded migrations to the given pool
///
/// Safe to run on every startup; already-applied migrations are skipped.
///
/// # Errors
///
/// Returns [`DatabaseError::MigrationFailed`] if a migration cannot be
/// applied.
pub async fn run_migrations(pool: &DatabasePool) -> Result<(), DatabaseError> {
    tracing::info!("Running database migrations...");

    sqlx::migrate!()
        .run(pool)
        .await
        .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

    tracing::info!("Database ready");
    Ok(())
}
