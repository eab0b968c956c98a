//! QR code repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use qrfolio_core::error::{AppError, ErrorKind};
use qrfolio_core::result::AppResult;
use qrfolio_entity::qr_code::{CreateQrCode, QrCode, UpdateQrCode};

/// Repository for QR code CRUD. Every query that touches an existing row
/// filters on the owning user.
#[derive(Debug, Clone)]
pub struct QrCodeRepository {
    pool: PgPool,
}

impl QrCodeRepository {
    /// Create a new QR code repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List an owner's codes in display order.
    pub async fn find_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<QrCode>> {
        sqlx::query_as::<_, QrCode>(
            "SELECT * FROM qr_codes WHERE user_id = $1 ORDER BY display_order ASC, created_at ASC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list QR codes", e))
    }

    /// List an owner's active codes in display order.
    pub async fn find_active_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<QrCode>> {
        sqlx::query_as::<_, QrCode>(
            "SELECT * FROM qr_codes WHERE user_id = $1 AND is_active = TRUE \
             ORDER BY display_order ASC, created_at ASC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list active QR codes", e))
    }

    /// Find a code by id if owned by `owner_id`.
    pub async fn find_owned(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<QrCode>> {
        sqlx::query_as::<_, QrCode>("SELECT * FROM qr_codes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find QR code", e))
    }

    /// Next free display position for an owner (0 for the first code).
    pub async fn next_display_order(&self, owner_id: Uuid) -> AppResult<i32> {
        sqlx::query_scalar("SELECT COALESCE(MAX(display_order) + 1, 0) FROM qr_codes WHERE user_id = $1")
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to compute display order", e))
    }

    /// Insert a new code.
    pub async fn create(&self, data: &CreateQrCode) -> AppResult<QrCode> {
        sqlx::query_as::<_, QrCode>(
            "INSERT INTO qr_codes (user_id, title, description, image_url, account_name, \
             account_number, display_order) VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(data.user_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.image_url)
        .bind(&data.account_name)
        .bind(&data.account_number)
        .bind(data.display_order)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create QR code", e))
    }

    /// Apply a partial update. Returns `None` when the code is not owned.
    pub async fn update(
        &self,
        id: Uuid,
        owner_id: Uuid,
        data: &UpdateQrCode,
    ) -> AppResult<Option<QrCode>> {
        sqlx::query_as::<_, QrCode>(
            "UPDATE qr_codes SET \
                 title = COALESCE($3, title), \
                 description = COALESCE($4, description), \
                 account_name = COALESCE($5, account_name), \
                 account_number = COALESCE($6, account_number), \
                 is_active = COALESCE($7, is_active), \
                 updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(owner_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.account_name)
        .bind(&data.account_number)
        .bind(data.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update QR code", e))
    }

    /// Rewrite display positions inside one transaction. Ids not owned by
    /// `owner_id` are skipped. Returns the number of rows changed.
    pub async fn reorder(&self, owner_id: Uuid, positions: &[(Uuid, i32)]) -> AppResult<u64> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e))?;

        let mut changed = 0;
        for (id, order) in positions {
            let result = sqlx::query(
                "UPDATE qr_codes SET display_order = $3, updated_at = NOW() \
                 WHERE id = $1 AND user_id = $2",
            )
            .bind(id)
            .bind(owner_id)
            .bind(order)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to reorder QR codes", e))?;
            changed += result.rows_affected();
        }

        tx.commit()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to commit reorder", e))?;
        Ok(changed)
    }

    /// Delete an owned code, returning the removed row.
    pub async fn delete_owned(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<QrCode>> {
        sqlx::query_as::<_, QrCode>("DELETE FROM qr_codes WHERE id = $1 AND user_id = $2 RETURNING *")
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete QR code", e))
    }
}
