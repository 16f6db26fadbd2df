//! API error handling
//!
//! The intake flow has a small, closed set of failure modes; each maps to a
//! fixed status code and a fixed `{ok:false, error, id?}` body. External
//! error detail is stored on the row, never echoed to the caller. `id` is
//! present exactly when a row was durably written, so the caller always
//! learns whether the data was retained.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use domain_intake::ValidationError;
use infra_db::DatabaseError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body was not valid JSON
    #[error("invalid JSON body")]
    InvalidJson,

    /// Required contact fields were absent after normalization
    #[error("missing required fields")]
    MissingRequiredFields,

    /// Required operating configuration is absent; nothing was attempted
    #[error("missing operating configuration: {0}")]
    ConfigMissing(&'static str),

    /// The store-first write failed; the request aborts before any sync
    #[error("submission store write failed: {0}")]
    PersistFailed(String),

    /// The sync attempt failed; the submission row was already written
    #[error("contact sync failed for submission {id}")]
    SyncFailed { id: String },
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, id) = match self {
            ApiError::InvalidJson => (StatusCode::BAD_REQUEST, "invalid_json", None),
            ApiError::MissingRequiredFields => {
                (StatusCode::BAD_REQUEST, "missing_required_fields", None)
            }
            ApiError::ConfigMissing(what) => (StatusCode::INTERNAL_SERVER_ERROR, what, None),
            ApiError::PersistFailed(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "store_write_failed", None)
            }
            ApiError::SyncFailed { id } => (StatusCode::BAD_GATEWAY, "ghl_sync_failed", Some(id)),
        };

        let body = ErrorResponse {
            ok: false,
            error: error.to_string(),
            id,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::MissingRequiredFields => ApiError::MissingRequiredFields,
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        ApiError::PersistFailed(err.to_string())
    }
}
