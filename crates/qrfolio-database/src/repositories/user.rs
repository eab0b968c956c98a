//! User repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use qrfolio_core::error::{AppError, ErrorKind};
use qrfolio_core::result::AppResult;
use qrfolio_entity::user::{CreateUser, User};

use super::map_write_error;

/// Repository for user accounts.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    /// Find a user by email (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    /// List all users, newest first.
    pub async fn find_all(&self) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))
    }

    /// Count all users.
    pub async fn count(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count users", e))
    }

    /// Insert a user without a registration phrase (admin bootstrap).
    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (email, name, password_hash, is_admin, registration_phrase_id) \
             VALUES (LOWER($1), $2, $3, $4, $5) RETURNING *",
        )
        .bind(&data.email)
        .bind(&data.name)
        .bind(&data.password_hash)
        .bind(data.is_admin)
        .bind(data.registration_phrase_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Failed to create user", "Email already registered"))
    }

    /// Register a user by consuming `phrase_id` in the same transaction.
    ///
    /// The phrase is claimed with a conditional update; returns `None`
    /// (and writes nothing) when another registration claimed it first or
    /// it expired. The default settings row is created alongside the user.
    pub async fn register_with_phrase(
        &self,
        data: &CreateUser,
        phrase_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<Option<User>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e))?;

        let claimed = sqlx::query(
            "UPDATE registration_phrases SET is_used = TRUE, used_at = $2 \
             WHERE id = $1 AND is_used = FALSE AND (expires_at IS NULL OR expires_at >= $2)",
        )
        .bind(phrase_id)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to claim phrase", e))?;

        if claimed.rows_affected() == 0 {
            tx.rollback()
                .await
                .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to roll back", e))?;
            return Ok(None);
        }

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (email, name, password_hash, is_admin, registration_phrase_id) \
             VALUES (LOWER($1), $2, $3, $4, $5) RETURNING *",
        )
        .bind(&data.email)
        .bind(&data.name)
        .bind(&data.password_hash)
        .bind(data.is_admin)
        .bind(phrase_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, "Failed to create user", "Email already registered"))?;

        sqlx::query("UPDATE registration_phrases SET used_by = $2 WHERE id = $1")
            .bind(phrase_id)
            .bind(user.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to link phrase", e))?;

        sqlx::query("INSERT INTO user_settings (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
            .bind(user.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create settings", e))?;

        tx.commit()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to commit registration", e))?;
        Ok(Some(user))
    }
}
