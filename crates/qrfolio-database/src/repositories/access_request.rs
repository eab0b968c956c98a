//! Access request repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use qrfolio_core::error::{AppError, ErrorKind};
use qrfolio_core::result::AppResult;
use qrfolio_entity::invite::{AccessRequest, AccessRequestStatus, CreateAccessRequest};

/// Repository for access requests.
#[derive(Debug, Clone)]
pub struct AccessRequestRepository {
    pool: PgPool,
}

impl AccessRequestRepository {
    /// Create a new access request repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Most recent request filed for an email.
    pub async fn find_latest_by_email(&self, email: &str) -> AppResult<Option<AccessRequest>> {
        sqlx::query_as::<_, AccessRequest>(
            "SELECT * FROM access_requests WHERE email = LOWER($1) ORDER BY created_at DESC LIMIT 1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find access request", e))
    }

    /// Remove rejected requests for an email so it can apply again.
    pub async fn delete_rejected_by_email(&self, email: &str) -> AppResult<u64> {
        let result = sqlx::query(
            "DELETE FROM access_requests WHERE email = LOWER($1) AND status = 'rejected'",
        )
        .bind(email)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to clear rejected requests", e))?;
        Ok(result.rows_affected())
    }

    /// File a pending request.
    pub async fn create(&self, data: &CreateAccessRequest) -> AppResult<AccessRequest> {
        sqlx::query_as::<_, AccessRequest>(
            "INSERT INTO access_requests (email, name, reason) VALUES (LOWER($1), $2, $3) RETURNING *",
        )
        .bind(&data.email)
        .bind(&data.name)
        .bind(&data.reason)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create access request", e))
    }

    /// List every request, newest first.
    pub async fn find_all(&self) -> AppResult<Vec<AccessRequest>> {
        sqlx::query_as::<_, AccessRequest>("SELECT * FROM access_requests ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list access requests", e))
    }

    /// Count pending requests.
    pub async fn count_pending(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM access_requests WHERE status = 'pending'")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count access requests", e))
    }

    /// Record a review decision.
    pub async fn set_status(
        &self,
        id: Uuid,
        status: AccessRequestStatus,
        reviewer: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<AccessRequest>> {
        sqlx::query_as::<_, AccessRequest>(
            "UPDATE access_requests SET status = $2, reviewed_by = $3, reviewed_at = $4 \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .bind(reviewer)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to review access request", e))
    }
}
