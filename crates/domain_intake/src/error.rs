//! Intake domain errors

use thiserror::Error;

/// Errors raised while validating an inbound payload
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Required contact fields are absent after normalization
    #[error("missing required fields: first_name and email must be non-empty")]
    MissingRequiredFields,
}

/// Errors raised by the external contact sync
///
/// These are the outcomes the orchestration needs to distinguish; transport
/// detail stays behind the [`ContactSync`](crate::ports::ContactSync) port so
/// the domain never depends on an HTTP client.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The CRM returned a non-success status; the body snapshot is truncated
    /// before it is carried here
    #[error("contact API returned status {status}: {body}")]
    Api { status: u16, body: String },

    /// The request never produced a response (connect failure, timeout)
    #[error("contact API request failed: {0}")]
    Transport(String),

    /// A success response that carried no recognizable contact identifier
    #[error("contact API response did not include a contact id")]
    MissingContactId,
}
