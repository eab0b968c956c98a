//! Per-user appearance settings for the public share page.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use qrfolio_core::config::StorageConfig;
use qrfolio_core::error::AppError;
use qrfolio_core::result::AppResult;
use qrfolio_core::traits::{BlobStore, Clock};
use qrfolio_database::repositories::SettingsRepository;
use qrfolio_entity::settings::{PageAppearance, UpdateSettings, UserSettings};
use qrfolio_storage::validate_image;

use crate::context::RequestContext;
use crate::upload::{non_blank, upload_key};

/// Whether `value` is a `#RRGGBB` color.
pub fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Reject malformed colors and normalize free-text fields.
fn sanitize(mut update: UpdateSettings) -> AppResult<UpdateSettings> {
    let colors = [
        ("primaryColor", &update.primary_color),
        ("secondaryColor", &update.secondary_color),
        ("backgroundColor", &update.background_color),
    ];
    for (field, color) in colors {
        if let Some(color) = color {
            if !is_hex_color(color) {
                return Err(AppError::validation(format!(
                    "{field}: Invalid color format"
                )));
            }
        }
    }

    update.page_title = non_blank(update.page_title);
    update.page_description = non_blank(update.page_description);
    Ok(update)
}

/// Reads and writes the caller's settings row.
#[derive(Debug, Clone)]
pub struct SettingsService {
    repo: Arc<SettingsRepository>,
    blobs: Arc<dyn BlobStore>,
    clock: Arc<dyn Clock>,
    max_logo_bytes: usize,
}

impl SettingsService {
    /// Creates a new settings service.
    pub fn new(
        repo: Arc<SettingsRepository>,
        blobs: Arc<dyn BlobStore>,
        clock: Arc<dyn Clock>,
        config: &StorageConfig,
    ) -> Self {
        Self {
            repo,
            blobs,
            clock,
            max_logo_bytes: config.max_logo_bytes,
        }
    }

    /// Stored appearance, or the defaults when nothing has been saved yet.
    pub async fn get(&self, ctx: &RequestContext) -> AppResult<PageAppearance> {
        Ok(self
            .repo
            .find_by_user(ctx.user_id)
            .await?
            .map(PageAppearance::from)
            .unwrap_or_default())
    }

    /// Validate and upsert a partial update.
    pub async fn update(&self, ctx: &RequestContext, update: UpdateSettings) -> AppResult<UserSettings> {
        let update = sanitize(update)?;
        let saved = self.repo.upsert(ctx.user_id, &update).await?;
        info!(user_id = %ctx.user_id, style = %saved.display_style, "Settings updated");
        Ok(saved)
    }

    /// Store a new logo and point the settings at it. The previous logo is
    /// removed best-effort.
    pub async fn upload_logo(
        &self,
        ctx: &RequestContext,
        content_type: Option<&str>,
        data: Bytes,
    ) -> AppResult<UserSettings> {
        let image = validate_image(content_type, &data, self.max_logo_bytes)?;
        let previous = self
            .repo
            .find_by_user(ctx.user_id)
            .await?
            .and_then(|s| s.logo_url);

        let key = upload_key("logos", ctx.user_id, self.clock.now(), image.extension);
        let url = self.blobs.put(&key, data).await?;
        let saved = self
            .repo
            .upsert(
                ctx.user_id,
                &UpdateSettings {
                    logo_url: Some(url),
                    ..UpdateSettings::default()
                },
            )
            .await?;

        if let Some(old) = previous.filter(|old| Some(old) != saved.logo_url.as_ref()) {
            if let Err(e) = self.blobs.delete_url(&old).await {
                warn!(url = %old, error = %e, "Failed to delete previous logo");
            }
        }

        info!(user_id = %ctx.user_id, key = %key, "Logo uploaded");
        Ok(saved)
    }

    /// Ensure a settings row exists for `user_id`.
    pub async fn ensure(&self, user_id: Uuid) -> AppResult<UserSettings> {
        self.repo.ensure(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qrfolio_core::error::ErrorKind;

    #[test]
    fn test_hex_colors() {
        assert!(is_hex_color("#3b82f6"));
        assert!(is_hex_color("#ABCDEF"));
        assert!(!is_hex_color("3b82f6"));
        assert!(!is_hex_color("#3b82f"));
        assert!(!is_hex_color("#3b82fg"));
        assert!(!is_hex_color("#3b82f6a"));
        assert!(!is_hex_color("red"));
    }

    #[test]
    fn test_sanitize_rejects_bad_color() {
        let err = sanitize(UpdateSettings {
            background_color: Some("white".to_string()),
            ..UpdateSettings::default()
        })
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.message.contains("backgroundColor"));
    }

    #[test]
    fn test_sanitize_blanks_text() {
        let clean = sanitize(UpdateSettings {
            primary_color: Some("#000000".to_string()),
            page_title: Some("   ".to_string()),
            ..UpdateSettings::default()
        })
        .unwrap();
        assert_eq!(clean.page_title, None);
        assert_eq!(clean.primary_color.as_deref(), Some("#000000"));
    }
}
