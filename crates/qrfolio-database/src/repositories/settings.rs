//! User settings repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use qrfolio_core::error::{AppError, ErrorKind};
use qrfolio_core::result::AppResult;
use qrfolio_entity::settings::{DisplayStyle, UpdateSettings, UserSettings};
use qrfolio_entity::settings::model::{
    DEFAULT_BACKGROUND_COLOR, DEFAULT_PRIMARY_COLOR, DEFAULT_SECONDARY_COLOR,
};

/// Repository for the one-row-per-user settings table.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: PgPool,
}

impl SettingsRepository {
    /// Create a new settings repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the stored settings row.
    pub async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<UserSettings>> {
        sqlx::query_as::<_, UserSettings>("SELECT * FROM user_settings WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find settings", e))
    }

    /// Insert the default row when missing and return the stored row.
    pub async fn ensure(&self, user_id: Uuid) -> AppResult<UserSettings> {
        sqlx::query("INSERT INTO user_settings (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create settings", e))?;

        self.find_by_user(user_id)
            .await?
            .ok_or_else(|| AppError::database("Settings row missing after insert"))
    }

    /// Insert or update the settings row. `None` fields keep the stored
    /// value, or the column default on first write.
    pub async fn upsert(&self, user_id: Uuid, data: &UpdateSettings) -> AppResult<UserSettings> {
        sqlx::query_as::<_, UserSettings>(
            "INSERT INTO user_settings (user_id, display_style, primary_color, secondary_color, \
                 background_color, logo_url, custom_css, show_account_details, page_title, \
                 page_description) \
             VALUES ($1, COALESCE($2, $11), COALESCE($3, $12), COALESCE($4, $13), \
                 COALESCE($5, $14), $6, $7, COALESCE($8, TRUE), $9, $10) \
             ON CONFLICT (user_id) DO UPDATE SET \
                 display_style = COALESCE($2, user_settings.display_style), \
                 primary_color = COALESCE($3, user_settings.primary_color), \
                 secondary_color = COALESCE($4, user_settings.secondary_color), \
                 background_color = COALESCE($5, user_settings.background_color), \
                 logo_url = COALESCE($6, user_settings.logo_url), \
                 custom_css = COALESCE($7, user_settings.custom_css), \
                 show_account_details = COALESCE($8, user_settings.show_account_details), \
                 page_title = COALESCE($9, user_settings.page_title), \
                 page_description = COALESCE($10, user_settings.page_description), \
                 updated_at = NOW() \
             RETURNING *",
        )
        .bind(user_id)
        .bind(data.display_style)
        .bind(&data.primary_color)
        .bind(&data.secondary_color)
        .bind(&data.background_color)
        .bind(&data.logo_url)
        .bind(&data.custom_css)
        .bind(data.show_account_details)
        .bind(&data.page_title)
        .bind(&data.page_description)
        .bind(DisplayStyle::default())
        .bind(DEFAULT_PRIMARY_COLOR)
        .bind(DEFAULT_SECONDARY_COLOR)
        .bind(DEFAULT_BACKGROUND_COLOR)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to save settings", e))
    }
}
