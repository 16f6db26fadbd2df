//! Repository implementations for domain entities
//!
//! This module provides concrete repository implementations that handle
//! database access for intake submissions. Repositories encapsulate SQL
//! queries and map between database rows and domain types.
//!
//! # Architecture
//!
//! - Single-row inserts and updates only; each request owns one row
//! - Runtime-checked queries (the store has a single, stable table)
//! - No deletes; the table is append-mostly by design

pub mod submission;

pub use submission::SubmissionRepository;
