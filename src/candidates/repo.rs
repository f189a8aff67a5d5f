use async_trait::async_trait;
use sqlx::PgPool;

use super::repo_types::{Candidate, NewCandidate, Page};
use crate::db::StoreError;

/// Resource store. Roll-number uniqueness is enforced here, atomically.
#[async_trait]
pub trait CandidateStore: Send + Sync {
    /// Insert a candidate. A duplicate roll number yields `StoreError::UniqueViolation`.
    async fn insert(&self, candidate: NewCandidate<'_>) -> Result<Candidate, StoreError>;

    /// Candidates ordered by creation time, newest first.
    async fn list(&self, page: Page) -> Result<Vec<Candidate>, StoreError>;
}

#[derive(Clone)]
pub struct PgCandidateStore {
    db: PgPool,
}

impl PgCandidateStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CandidateStore for PgCandidateStore {
    async fn insert(&self, candidate: NewCandidate<'_>) -> Result<Candidate, StoreError> {
        let row = sqlx::query_as::<_, Candidate>(
            r#"
            INSERT INTO candidates (name, roll_number, google_drive_link)
            VALUES ($1, $2, $3)
            RETURNING id, name, roll_number, google_drive_link, created_at
            "#,
        )
        .bind(candidate.name)
        .bind(candidate.roll_number)
        .bind(candidate.google_drive_link)
        .fetch_one(&self.db)
        .await?;
        Ok(row)
    }

    async fn list(&self, page: Page) -> Result<Vec<Candidate>, StoreError> {
        // LIMIT NULL is LIMIT ALL
        let rows = sqlx::query_as::<_, Candidate>(
            r#"
            SELECT id, name, roll_number, google_drive_link, created_at
            FROM candidates
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }
}
