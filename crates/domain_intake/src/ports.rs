//! Intake domain ports
//!
//! The intake orchestration needs exactly one thing from the outside world:
//! push a normalized contact into the CRM and get back its identifier. The
//! `ContactSync` trait is that seam, so adapters can be swapped without
//! touching the request flow:
//!
//! - **HTTP adapter**: the production client in `infra_crm`
//! - **Mock adapter**: for exercising the orchestration in tests

use async_trait::async_trait;

use crate::error::SyncError;
use crate::normalize::NormalizedSubmission;

/// Outbound contact synchronization port
///
/// One call per submission, create-only, no retries and no idempotency
/// lookup. Implementations classify every non-success response as a
/// [`SyncError`] rather than surfacing transport detail.
#[async_trait]
pub trait ContactSync: Send + Sync {
    /// Pushes the contact to the external CRM and returns its identifier
    async fn upsert_contact(&self, contact: &NormalizedSubmission) -> Result<String, SyncError>;
}
