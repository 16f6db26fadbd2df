//! Intake Domain
//!
//! This crate models one form-originated lead capture event (a submission)
//! and the rules around accepting it:
//!
//! - **Submission model**: an immutable capture payload with mutable
//!   sync-status fields overlaid, written exactly once after the single
//!   CRM sync attempt.
//! - **Normalization**: inbound payloads arrive from several landing page
//!   variants with inconsistent field casing; normalization resolves the
//!   aliases, trims values, enforces required fields, and applies defaults.
//! - **Ports**: the `ContactSync` trait is the seam the request
//!   orchestration calls through to reach the external CRM, so the HTTP
//!   layer never depends on a concrete client.
//!
//! # Lifecycle
//!
//! A submission is created with sync status `pending`, updated exactly once
//! with the outcome of the sync attempt (`ok` or `error`), and is read-only
//! from then on. Submissions are never deleted.

pub mod error;
pub mod normalize;
pub mod ports;
pub mod submission;

pub use error::{SyncError, ValidationError};
pub use normalize::{clean, is_honeypot, normalize, NormalizedSubmission};
pub use ports::ContactSync;
pub use submission::{
    NewSubmission, RequestMeta, SyncOutcome, SyncStatus, SYNC_ERROR_MAX_LEN,
};
