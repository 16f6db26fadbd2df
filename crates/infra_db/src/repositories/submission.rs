//! Submission repository implementation
//!
//! This module provides database access for intake submissions. The write
//! pattern is deliberately narrow:
//!
//! - [`SubmissionRepository::insert`] persists the capture columns exactly
//!   once, before any external call is made (store-first).
//! - [`SubmissionRepository::record_sync_outcome`] overlays the result of
//!   the single sync attempt onto the same row, incrementing the attempt
//!   counter in SQL so the row stays consistent even if a retry sweep is
//!   added later.
//!
//! Rows are never deleted and the capture columns are never updated.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use domain_intake::{NewSubmission, SyncOutcome, SyncStatus, SYNC_ERROR_MAX_LEN};

use crate::error::DatabaseError;

/// Repository for intake submission rows
#[derive(Debug, Clone)]
pub struct SubmissionRepository {
    pool: SqlitePool,
}

impl SubmissionRepository {
    /// Creates a new SubmissionRepository with the given connection pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts a new submission row with sync columns at their defaults
    ///
    /// This is the store-first write: it must complete before the external
    /// sync is attempted, so a downstream failure can never lose the
    /// submission.
    ///
    /// # Errors
    ///
    /// Returns a [`DatabaseError`] if the write is rejected; the caller must
    /// not proceed to the external sync in that case.
    pub async fn insert(&self, submission: &NewSubmission) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO intake_submissions (
                id, created_at, source, ip, user_agent, raw_json,
                first_name, last_name, email, phone,
                business_name, goal, other_info, preferred_followup
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&submission.id)
        .bind(submission.created_at)
        .bind(&submission.source)
        .bind(&submission.ip)
        .bind(&submission.user_agent)
        .bind(&submission.raw_json)
        .bind(&submission.contact.first_name)
        .bind(&submission.contact.last_name)
        .bind(&submission.contact.email)
        .bind(&submission.contact.phone)
        .bind(&submission.contact.business_name)
        .bind(&submission.contact.goal)
        .bind(&submission.contact.other_info)
        .bind(&submission.contact.preferred_followup)
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::from(&e))?;

        Ok(())
    }

    /// Records the outcome of the single sync attempt on one row
    ///
    /// Sets the status and either the contact id or the truncated error
    /// detail, increments `sync_attempts`, and stamps `last_sync_at`.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::NotFound`] if no row matches `id`. A failure
    /// here must be logged by the caller but never treated as loss of the
    /// submission; the capture row already exists with its pending status.
    pub async fn record_sync_outcome(
        &self,
        id: &str,
        outcome: &SyncOutcome,
    ) -> Result<(), DatabaseError> {
        let now = Utc::now();

        let result = match outcome {
            SyncOutcome::Ok { contact_id } => {
                sqlx::query(
                    r#"
                    UPDATE intake_submissions
                    SET ghl_sync_status = 'ok',
                        ghl_contact_id = ?,
                        sync_attempts = sync_attempts + 1,
                        last_sync_at = ?
                    WHERE id = ?
                    "#,
                )
                .bind(contact_id)
                .bind(now)
                .bind(id)
                .execute(&self.pool)
                .await?
            }
            SyncOutcome::Error { message } => {
                let detail: String = message.chars().take(SYNC_ERROR_MAX_LEN).collect();
                sqlx::query(
                    r#"
                    UPDATE intake_submissions
                    SET ghl_sync_status = 'error',
                        ghl_error = ?,
                        sync_attempts = sync_attempts + 1,
                        last_sync_at = ?
                    WHERE id = ?
                    "#,
                )
                .bind(detail)
                .bind(now)
                .bind(id)
                .execute(&self.pool)
                .await?
            }
        };

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Submission", id));
        }

        Ok(())
    }

    /// Retrieves a submission by its identifier
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::NotFound`] if no row matches `id`.
    pub async fn get_by_id(&self, id: &str) -> Result<SubmissionRow, DatabaseError> {
        let row = sqlx::query_as::<_, SubmissionRow>(
            r#"
            SELECT
                id, created_at, source, ip, user_agent, raw_json,
                first_name, last_name, email, phone,
                business_name, goal, other_info, preferred_followup,
                ghl_sync_status, ghl_contact_id, ghl_error,
                sync_attempts, last_sync_at
            FROM intake_submissions
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Submission", id))?;

        Ok(row)
    }

    /// Counts stored submissions
    pub async fn count(&self) -> Result<i64, DatabaseError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM intake_submissions")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Database row representation of a stored submission
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SubmissionRow {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub source: String,
    pub ip: String,
    pub user_agent: String,
    pub raw_json: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub business_name: String,
    pub goal: String,
    pub other_info: String,
    pub preferred_followup: String,
    pub ghl_sync_status: String,
    pub ghl_contact_id: Option<String>,
    pub ghl_error: Option<String>,
    pub sync_attempts: i64,
    pub last_sync_at: Option<DateTime<Utc>>,
}

impl SubmissionRow {
    /// The typed sync status of this row
    ///
    /// Unknown column values map to `None`; the schema default and the two
    /// outcome writes are the only producers.
    pub fn sync_status(&self) -> Option<SyncStatus> {
        SyncStatus::parse(&self.ghl_sync_status)
    }
}
