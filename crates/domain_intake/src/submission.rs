//! Submission model
//!
//! One `Submission` row exists per intake event. The capture fields are
//! written exactly once at creation and never revisited; the sync-status
//! fields are written exactly once more, after the single CRM sync attempt,
//! whatever its outcome.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::error::SyncError;
use crate::normalize::NormalizedSubmission;

/// Upper bound on stored sync error detail, in characters
pub const SYNC_ERROR_MAX_LEN: usize = 1000;

/// Sync state of a stored submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    /// Stored, sync not yet attempted
    Pending,
    /// Sync attempt succeeded and a contact id was recorded
    Ok,
    /// Sync attempt failed; error detail recorded on the row
    Error,
}

impl SyncStatus {
    /// Stable string form used in the database column
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncStatus::Pending => "pending",
            SyncStatus::Ok => "ok",
            SyncStatus::Error => "error",
        }
    }

    /// Parses the database column form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(SyncStatus::Pending),
            "ok" => Some(SyncStatus::Ok),
            "error" => Some(SyncStatus::Error),
            _ => None,
        }
    }
}

/// Request metadata captured alongside the payload
#[derive(Debug, Clone, Default)]
pub struct RequestMeta {
    pub ip: String,
    pub user_agent: String,
}

/// The recorded result of the one external sync attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Contact created; external identifier retained
    Ok { contact_id: String },
    /// Sync failed; the message is truncated before storage
    Error { message: String },
}

impl SyncOutcome {
    /// Builds the outcome to record from a sync attempt's result
    pub fn from_result(result: &Result<String, SyncError>) -> Self {
        match result {
            Ok(contact_id) => SyncOutcome::Ok {
                contact_id: contact_id.clone(),
            },
            Err(e) => SyncOutcome::Error {
                message: e.to_string(),
            },
        }
    }

    /// The status column value this outcome writes
    pub fn status(&self) -> SyncStatus {
        match self {
            SyncOutcome::Ok { .. } => SyncStatus::Ok,
            SyncOutcome::Error { .. } => SyncStatus::Error,
        }
    }
}

/// A fully captured submission, ready for the store-first insert
///
/// Carries every immutable column of the row. Sync-status columns start at
/// their schema defaults and are not represented here.
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub source: String,
    pub ip: String,
    pub user_agent: String,
    /// Original payload plus `_meta` capture block, stored verbatim for
    /// audit and replay
    pub raw_json: String,
    pub contact: NormalizedSubmission,
}

impl NewSubmission {
    /// Captures a validated payload into a storable submission
    ///
    /// Generates the identifier and creation timestamp, and assembles
    /// `raw_json` as the original payload with a `_meta` object recording
    /// when and from where it arrived.
    pub fn capture(payload: &Value, contact: NormalizedSubmission, meta: RequestMeta) -> Self {
        let id = Uuid::new_v4().to_string();
        let created_at = Utc::now();

        let mut raw: Map<String, Value> = match payload {
            Value::Object(map) => map.clone(),
            // Validation only admits objects; keep non-objects recoverable
            // anyway rather than dropping them.
            other => {
                let mut map = Map::new();
                map.insert("payload".to_string(), other.clone());
                map
            }
        };
        raw.insert(
            "_meta".to_string(),
            json!({
                "created_at": created_at.to_rfc3339(),
                "ip": meta.ip,
                "user_agent": meta.user_agent,
            }),
        );

        Self {
            id,
            created_at,
            source: contact.source.clone(),
            ip: meta.ip,
            user_agent: meta.user_agent,
            raw_json: Value::Object(raw).to_string(),
            contact,
        }
    }
}
