//! Intake handler
//!
//! The orchestration is strictly sequential per request:
//!
//! 1. Refuse outright when the CRM credentials are not configured.
//! 2. Parse and normalize the payload; honeypot and validation rejects
//!    happen before anything is persisted.
//! 3. Store-first: the submission row must be durable before the external
//!    call starts, so a downstream failure can never lose it.
//! 4. One sync attempt; its outcome is recorded onto the same row whatever
//!    happens. A failure writing the outcome is logged, not surfaced — the
//!    capture row already exists.
//! 5. The response always carries the stored id once the row exists, so the
//!    caller knows the data was retained even when the sync failed.

use axum::{body::Bytes, extract::State, http::HeaderMap, Json};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use domain_intake::{is_honeypot, normalize, NewSubmission, RequestMeta, SyncOutcome};

use crate::dto::intake::IntakeAccepted;
use crate::{error::ApiError, AppState};

/// Handles one intake submission
pub async fn submit_intake(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<IntakeAccepted>, ApiError> {
    let Some(crm) = state.crm.clone() else {
        return Err(ApiError::ConfigMissing("missing_ghl_env"));
    };

    let payload: Value = serde_json::from_slice(&body).map_err(|_| ApiError::InvalidJson)?;

    if is_honeypot(&payload) {
        debug!("honeypot field set; discarding submission silently");
        return Ok(Json(IntakeAccepted::discarded()));
    }

    let contact = normalize(&payload)?;
    let submission = NewSubmission::capture(&payload, contact, request_meta(&headers));

    // Store-first: nothing downstream runs until this row is committed.
    state.repo.insert(&submission).await.map_err(|e| {
        error!(error = %e, "store-first insert failed; aborting before sync");
        ApiError::from(e)
    })?;

    let result = crm.upsert_contact(&submission.contact).await;

    let outcome = SyncOutcome::from_result(&result);
    if let Err(e) = state.repo.record_sync_outcome(&submission.id, &outcome).await {
        // The external call already happened; the row keeps its pending
        // status and the anomaly is only surfaced in the logs.
        warn!(id = %submission.id, error = %e, "failed to record sync outcome");
    }

    match result {
        Ok(contact_id) => {
            info!(id = %submission.id, contact_id = %contact_id, "submission stored and synced");
            Ok(Json(IntakeAccepted::synced(submission.id, contact_id)))
        }
        Err(e) => {
            warn!(id = %submission.id, error = %e, "contact sync failed; submission retained");
            Err(ApiError::SyncFailed { id: submission.id })
        }
    }
}

/// Captures request metadata for the audit trail
fn request_meta(headers: &HeaderMap) -> RequestMeta {
    let ip = header_value(headers, "cf-connecting-ip")
        .or_else(|| header_value(headers, "x-forwarded-for"))
        .unwrap_or_default();
    let user_agent = header_value(headers, "user-agent").unwrap_or_default();
    RequestMeta { ip, user_agent }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
