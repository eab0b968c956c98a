//! Share link repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use qrfolio_core::error::{AppError, ErrorKind};
use qrfolio_core::result::AppResult;
use qrfolio_entity::share::{
    NewShareLink, NewShareLinkLog, ShareLink, ShareLinkLog, ShareLinkRow,
};

use super::map_write_error;
use crate::store::ShareLinkStore;

/// Postgres-backed [`ShareLinkStore`].
#[derive(Debug, Clone)]
pub struct ShareLinkRepository {
    pool: PgPool,
}

impl ShareLinkRepository {
    /// Create a new share link repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Count every link (CLI listing).
    pub async fn count_all(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM share_links")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count share links", e))
    }

    /// List the most recent links across all owners (CLI listing).
    pub async fn list_recent(&self, limit: i64) -> AppResult<Vec<ShareLink>> {
        let rows = sqlx::query_as::<_, ShareLinkRow>(
            "SELECT * FROM share_links ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list share links", e))?;
        Ok(rows.into_iter().map(ShareLink::from).collect())
    }
}

#[async_trait]
impl ShareLinkStore for ShareLinkRepository {
    async fn insert(&self, data: &NewShareLink) -> AppResult<ShareLink> {
        let row = sqlx::query_as::<_, ShareLinkRow>(
            "INSERT INTO share_links (user_id, token, link_type, expires_at, created_at) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(data.user_id)
        .bind(&data.token)
        .bind(data.link_type)
        .bind(data.expires_at)
        .bind(data.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Failed to create share link", "Share token already exists"))?;
        Ok(row.into())
    }

    async fn find_by_token(&self, token: &str) -> AppResult<Option<ShareLink>> {
        let row = sqlx::query_as::<_, ShareLinkRow>("SELECT * FROM share_links WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find share link by token", e)
            })?;
        Ok(row.map(ShareLink::from))
    }

    async fn find_owned(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<ShareLink>> {
        let row = sqlx::query_as::<_, ShareLinkRow>(
            "SELECT * FROM share_links WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find share link", e))?;
        Ok(row.map(ShareLink::from))
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<ShareLink>> {
        let rows = sqlx::query_as::<_, ShareLinkRow>(
            "SELECT * FROM share_links WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list share links", e))?;
        Ok(rows.into_iter().map(ShareLink::from).collect())
    }

    async fn record_access(&self, id: Uuid, now: DateTime<Utc>) -> AppResult<Option<ShareLink>> {
        // The WHERE clause repeats the redeemability check so the row lock
        // taken by UPDATE serializes concurrent redemptions.
        let row = sqlx::query_as::<_, ShareLinkRow>(
            "UPDATE share_links SET \
                 access_count = access_count + 1, \
                 last_accessed_at = $2, \
                 is_used = CASE WHEN link_type = 'one_time' THEN TRUE ELSE is_used END, \
                 used_at = CASE WHEN link_type = 'one_time' THEN $2 ELSE used_at END \
             WHERE id = $1 AND ( \
                 (link_type = 'one_time' AND is_used = FALSE) \
                 OR (link_type = 'expiring' AND (expires_at IS NULL OR expires_at >= $2)) \
             ) \
             RETURNING *",
        )
        .bind(id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to record share access", e))?;
        Ok(row.map(ShareLink::from))
    }

    async fn delete_owned(&self, id: Uuid, owner_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM share_links WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete share link", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn append_log(&self, entry: &NewShareLinkLog) -> AppResult<ShareLinkLog> {
        sqlx::query_as::<_, ShareLinkLog>(
            "INSERT INTO share_link_logs (share_link_id, ip_address, user_agent, accessed_at) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(entry.share_link_id)
        .bind(&entry.ip_address)
        .bind(&entry.user_agent)
        .bind(entry.accessed_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to append share access log", e))
    }

    async fn list_logs(&self, link_id: Uuid) -> AppResult<Vec<ShareLinkLog>> {
        sqlx::query_as::<_, ShareLinkLog>(
            "SELECT * FROM share_link_logs WHERE share_link_id = $1 ORDER BY accessed_at DESC",
        )
        .bind(link_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list share access logs", e))
    }
}
