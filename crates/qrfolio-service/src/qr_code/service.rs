//! QR code CRUD, ordering and image upload.

use std::sync::Arc;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use qrfolio_core::config::StorageConfig;
use qrfolio_core::error::AppError;
use qrfolio_core::result::AppResult;
use qrfolio_core::traits::{BlobStore, Clock};
use qrfolio_database::repositories::QrCodeRepository;
use qrfolio_entity::qr_code::{CreateQrCode, QrCode, UpdateQrCode};
use qrfolio_storage::validate_image;

use crate::context::RequestContext;
use crate::upload::{key_owned_by, non_blank, upload_key};

const QR_FOLDER: &str = "qr-codes";

/// Fields supplied when creating a QR code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQrCode {
    pub title: String,
    pub description: Option<String>,
    /// URL returned by a prior upload.
    pub image_url: String,
    pub account_name: Option<String>,
    pub account_number: Option<String>,
}

/// Manages the caller's payment QR codes.
#[derive(Debug, Clone)]
pub struct QrCodeService {
    repo: Arc<QrCodeRepository>,
    blobs: Arc<dyn BlobStore>,
    clock: Arc<dyn Clock>,
    max_image_bytes: usize,
}

impl QrCodeService {
    /// Creates a new QR code service.
    pub fn new(
        repo: Arc<QrCodeRepository>,
        blobs: Arc<dyn BlobStore>,
        clock: Arc<dyn Clock>,
        config: &StorageConfig,
    ) -> Self {
        Self {
            repo,
            blobs,
            clock,
            max_image_bytes: config.max_qr_image_bytes,
        }
    }

    /// Validate and store a QR image, returning its public URL.
    pub async fn upload_image(
        &self,
        ctx: &RequestContext,
        content_type: Option<&str>,
        data: Bytes,
    ) -> AppResult<String> {
        let image = validate_image(content_type, &data, self.max_image_bytes)?;
        let key = upload_key(QR_FOLDER, ctx.user_id, self.clock.now(), image.extension);
        let url = self.blobs.put(&key, data).await?;
        info!(user_id = %ctx.user_id, key = %key, "QR image uploaded");
        Ok(url)
    }

    /// Append a new code after the caller's existing ones.
    pub async fn create(&self, ctx: &RequestContext, input: NewQrCode) -> AppResult<QrCode> {
        let title = input.title.trim();
        if title.is_empty() {
            return Err(AppError::validation("Title is required"));
        }
        let image_url = input.image_url.trim();
        if image_url.is_empty() {
            return Err(AppError::validation("Image is required"));
        }
        if !self.owns_image(ctx, image_url) {
            return Err(AppError::validation(
                "Image must be one of your uploaded QR images",
            ));
        }

        let display_order = self.repo.next_display_order(ctx.user_id).await?;
        let code = self
            .repo
            .create(&CreateQrCode {
                user_id: ctx.user_id,
                title: title.to_string(),
                description: non_blank(input.description),
                image_url: image_url.to_string(),
                account_name: non_blank(input.account_name),
                account_number: non_blank(input.account_number),
                display_order,
            })
            .await?;

        info!(user_id = %ctx.user_id, qr_code_id = %code.id, display_order, "QR code created");
        Ok(code)
    }

    /// Whether `url` names a blob under the caller's QR upload folder.
    fn owns_image(&self, ctx: &RequestContext, url: &str) -> bool {
        self.blobs
            .key_for_url(url)
            .is_some_and(|key| key_owned_by(&key, QR_FOLDER, ctx.user_id))
    }

    /// The caller's codes in display order.
    pub async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<QrCode>> {
        self.repo.find_by_owner(ctx.user_id).await
    }

    /// Partially update one of the caller's codes.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        mut changes: UpdateQrCode,
    ) -> AppResult<QrCode> {
        if let Some(title) = changes.title.as_mut() {
            *title = title.trim().to_string();
            if title.is_empty() {
                return Err(AppError::validation("Title is required"));
            }
        }
        if changes.is_empty() {
            return self
                .repo
                .find_owned(id, ctx.user_id)
                .await?
                .ok_or_else(|| AppError::not_found("QR code not found"));
        }

        self.repo
            .update(id, ctx.user_id, &changes)
            .await?
            .ok_or_else(|| AppError::not_found("QR code not found"))
    }

    /// Set display positions for the caller's codes.
    pub async fn reorder(&self, ctx: &RequestContext, positions: &[(Uuid, i32)]) -> AppResult<()> {
        let changed = self.repo.reorder(ctx.user_id, positions).await?;
        info!(user_id = %ctx.user_id, requested = positions.len(), changed, "QR codes reordered");
        Ok(())
    }

    /// Delete one of the caller's codes. The image is removed in the
    /// background; a failure there is only logged.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        let code = self
            .repo
            .delete_owned(id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("QR code not found"))?;

        info!(user_id = %ctx.user_id, qr_code_id = %id, "QR code deleted");

        if !self.owns_image(ctx, &code.image_url) {
            debug!(
                qr_code_id = %id,
                url = %code.image_url,
                "Leaving image outside the caller's uploads"
            );
            return Ok(());
        }
        let blobs = Arc::clone(&self.blobs);
        tokio::spawn(async move {
            if let Err(e) = blobs.delete_url(&code.image_url).await {
                warn!(url = %code.image_url, error = %e, "Failed to delete QR image");
            }
        });
        Ok(())
    }
}
