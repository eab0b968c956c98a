//! Registration phrase repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use qrfolio_core::error::{AppError, ErrorKind};
use qrfolio_core::result::AppResult;
use qrfolio_entity::invite::{CreatePhrase, RegistrationPhrase};

use super::map_write_error;

/// Repository for invite phrases.
#[derive(Debug, Clone)]
pub struct PhraseRepository {
    pool: PgPool,
}

impl PhraseRepository {
    /// Create a new phrase repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a phrase. A duplicate phrase yields `Conflict`.
    pub async fn create(&self, data: &CreatePhrase) -> AppResult<RegistrationPhrase> {
        sqlx::query_as::<_, RegistrationPhrase>(
            "INSERT INTO registration_phrases (phrase, expires_at, created_by) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&data.phrase)
        .bind(data.expires_at)
        .bind(&data.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Failed to create phrase", "Phrase already exists"))
    }

    /// Find a phrase by its text.
    pub async fn find_by_phrase(&self, phrase: &str) -> AppResult<Option<RegistrationPhrase>> {
        sqlx::query_as::<_, RegistrationPhrase>(
            "SELECT * FROM registration_phrases WHERE phrase = $1",
        )
        .bind(phrase)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find phrase", e))
    }

    /// Find a phrase by id.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<RegistrationPhrase>> {
        sqlx::query_as::<_, RegistrationPhrase>("SELECT * FROM registration_phrases WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find phrase", e))
    }

    /// List all phrases, newest first.
    pub async fn find_all(&self) -> AppResult<Vec<RegistrationPhrase>> {
        sqlx::query_as::<_, RegistrationPhrase>(
            "SELECT * FROM registration_phrases ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list phrases", e))
    }

    /// Count all phrases.
    pub async fn count(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM registration_phrases")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count phrases", e))
    }

    /// Delete a phrase that has not been used. Returns whether a row was removed.
    pub async fn delete_unused(&self, id: Uuid) -> AppResult<bool> {
        let result =
            sqlx::query("DELETE FROM registration_phrases WHERE id = $1 AND is_used = FALSE")
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete phrase", e))?;
        Ok(result.rows_affected() > 0)
    }
}
