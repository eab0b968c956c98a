//! Route handlers.

pub mod access_requests;
pub mod admin;
pub mod auth;
pub mod health;
pub mod qr_codes;
pub mod settings;
pub mod share_links;
pub mod share_page;
pub mod uploads;

use axum::extract::Multipart;
use bytes::Bytes;

use qrfolio_core::error::AppError;

/// The `file` part of a multipart upload.
pub(crate) struct FilePart {
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// Read the `file` field, ignoring any other parts.
pub(crate) async fn read_file_part(mut multipart: Multipart) -> Result<FilePart, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let content_type = field.content_type().map(String::from);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
        return Ok(FilePart { content_type, data });
    }
    Err(AppError::validation("No file uploaded"))
}
