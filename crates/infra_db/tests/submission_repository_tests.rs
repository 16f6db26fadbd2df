//! Submission repository tests
//!
//! Run against an in-memory SQLite pool with the embedded migrations
//! applied, exercising the store-first insert and the outcome overlay.

use domain_intake::{
    normalize, NewSubmission, RequestMeta, SyncError, SyncOutcome, SyncStatus, SYNC_ERROR_MAX_LEN,
};
use infra_db::{run_migrations, DatabasePool, SubmissionRepository};
use serde_json::json;
use sqlx::sqlite::SqlitePoolOptions;

async fn test_pool() -> DatabasePool {
    // A single connection keeps every query on the same in-memory database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");
    run_migrations(&pool).await.expect("migrations");
    pool
}

fn sample_submission() -> NewSubmission {
    let payload = json!({
        "first_name": "Ana",
        "last_name": "Reyes",
        "email": "ana@example.com",
        "phone": "+1 555 0100",
        "business_name": "Reyes Consulting",
        "goal": "Answer after-hours calls",
    });
    let contact = normalize(&payload).expect("valid payload");
    NewSubmission::capture(
        &payload,
        contact,
        RequestMeta {
            ip: "203.0.113.9".to_string(),
            user_agent: "test-agent".to_string(),
        },
    )
}

/// A freshly inserted row carries the capture fields and pending defaults
#[tokio::test]
async fn insert_then_fetch_round_trips() {
    let repo = SubmissionRepository::new(test_pool().await);
    let submission = sample_submission();

    repo.insert(&submission).await.unwrap();

    let row = repo.get_by_id(&submission.id).await.unwrap();
    assert_eq!(row.id, submission.id);
    assert_eq!(row.first_name, "Ana");
    assert_eq!(row.last_name, "Reyes");
    assert_eq!(row.email, "ana@example.com");
    assert_eq!(row.business_name, "Reyes Consulting");
    assert_eq!(row.preferred_followup, "text");
    assert_eq!(row.ip, "203.0.113.9");
    assert_eq!(row.user_agent, "test-agent");

    // Sync columns start at their schema defaults.
    assert_eq!(row.sync_status(), Some(SyncStatus::Pending));
    assert_eq!(row.sync_attempts, 0);
    assert!(row.ghl_contact_id.is_none());
    assert!(row.ghl_error.is_none());
    assert!(row.last_sync_at.is_none());
}

/// raw_json stores the original payload plus the capture metadata
#[tokio::test]
async fn raw_json_preserves_payload_and_meta() {
    let repo = SubmissionRepository::new(test_pool().await);
    let submission = sample_submission();

    repo.insert(&submission).await.unwrap();

    let row = repo.get_by_id(&submission.id).await.unwrap();
    let raw: serde_json::Value = serde_json::from_str(&row.raw_json).unwrap();
    assert_eq!(raw["first_name"], "Ana");
    assert_eq!(raw["goal"], "Answer after-hours calls");
    assert_eq!(raw["_meta"]["ip"], "203.0.113.9");
    assert_eq!(raw["_meta"]["user_agent"], "test-agent");
    assert!(raw["_meta"]["created_at"].is_string());
}

/// A successful outcome sets status, contact id, and the attempt counter
#[tokio::test]
async fn record_ok_outcome() {
    let repo = SubmissionRepository::new(test_pool().await);
    let submission = sample_submission();
    repo.insert(&submission).await.unwrap();

    let outcome = SyncOutcome::Ok {
        contact_id: "ghl-contact-42".to_string(),
    };
    repo.record_sync_outcome(&submission.id, &outcome)
        .await
        .unwrap();

    let row = repo.get_by_id(&submission.id).await.unwrap();
    assert_eq!(row.sync_status(), Some(SyncStatus::Ok));
    assert_eq!(row.ghl_contact_id.as_deref(), Some("ghl-contact-42"));
    assert!(row.ghl_error.is_none());
    assert_eq!(row.sync_attempts, 1);
    assert!(row.last_sync_at.is_some());
}

/// A failed outcome records truncated error detail without touching capture
#[tokio::test]
async fn record_error_outcome_truncates_detail() {
    let repo = SubmissionRepository::new(test_pool().await);
    let submission = sample_submission();
    repo.insert(&submission).await.unwrap();

    let long_body = "x".repeat(5 * SYNC_ERROR_MAX_LEN);
    let outcome = SyncOutcome::from_result(&Err(SyncError::Api {
        status: 500,
        body: long_body,
    }));
    repo.record_sync_outcome(&submission.id, &outcome)
        .await
        .unwrap();

    let row = repo.get_by_id(&submission.id).await.unwrap();
    assert_eq!(row.sync_status(), Some(SyncStatus::Error));
    let detail = row.ghl_error.expect("error detail recorded");
    assert!(!detail.is_empty());
    assert!(detail.chars().count() <= SYNC_ERROR_MAX_LEN);
    assert_eq!(row.sync_attempts, 1);

    // The capture columns are untouched by the overlay.
    assert_eq!(row.first_name, "Ana");
    assert_eq!(row.email, "ana@example.com");
}

/// Recording against an unknown id surfaces NotFound instead of silence
#[tokio::test]
async fn record_outcome_for_unknown_id_fails() {
    let repo = SubmissionRepository::new(test_pool().await);

    let outcome = SyncOutcome::Ok {
        contact_id: "ghl-contact-42".to_string(),
    };
    let err = repo
        .record_sync_outcome("no-such-id", &outcome)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

/// Duplicate identifiers are rejected by the primary key
#[tokio::test]
async fn duplicate_id_maps_to_duplicate_entry() {
    let repo = SubmissionRepository::new(test_pool().await);
    let submission = sample_submission();

    repo.insert(&submission).await.unwrap();
    let err = repo.insert(&submission).await.unwrap_err();
    assert!(err.is_constraint_violation());
}

#[tokio::test]
async fn count_reflects_inserts() {
    let repo = SubmissionRepository::new(test_pool().await);
    assert_eq!(repo.count().await.unwrap(), 0);

    repo.insert(&sample_submission()).await.unwrap();
    repo.insert(&sample_submission()).await.unwrap();
    assert_eq!(repo.count().await.unwrap(), 2);
}
