//! Upload checks shared by QR images and logos.

use image::ImageFormat;

use qrfolio_core::error::AppError;
use qrfolio_core::result::AppResult;

/// An upload that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadedImage {
    /// Format sniffed from the file header.
    pub format: ImageFormat,
    /// Canonical file extension for storage keys.
    pub extension: &'static str,
}

/// Check a multipart upload before it is stored.
///
/// The declared content type must be `image/*`, the payload must be
/// non-empty and at most `max_bytes`, and its header must match a known
/// image format. The declared type is not trusted beyond the prefix.
pub fn validate_image(
    content_type: Option<&str>,
    data: &[u8],
    max_bytes: usize,
) -> AppResult<UploadedImage> {
    if !content_type.is_some_and(|ct| ct.starts_with("image/")) {
        return Err(AppError::validation("File must be an image"));
    }
    if data.is_empty() {
        return Err(AppError::validation("File is empty"));
    }
    if data.len() > max_bytes {
        return Err(AppError::validation(format!(
            "File size must be less than {}MB",
            max_bytes / (1024 * 1024)
        )));
    }

    let format = image::guess_format(data)
        .map_err(|_| AppError::validation("File is not a recognized image format"))?;
    let extension = format.extensions_str().first().copied().unwrap_or("img");

    Ok(UploadedImage { format, extension })
}

#[cfg(test)]
mod tests {
    use super::*;
    use qrfolio_core::error::ErrorKind;

    const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    #[test]
    fn test_accepts_png() {
        let img = validate_image(Some("image/png"), PNG_HEADER, 1024).unwrap();
        assert_eq!(img.format, ImageFormat::Png);
        assert_eq!(img.extension, "png");
    }

    #[test]
    fn test_rejects_non_image_content_type() {
        let err = validate_image(Some("application/pdf"), PNG_HEADER, 1024).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(validate_image(None, PNG_HEADER, 1024).is_err());
    }

    #[test]
    fn test_rejects_oversize() {
        let data = [PNG_HEADER, &[0u8; 64][..]].concat();
        let err = validate_image(Some("image/png"), &data, 32).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_rejects_spoofed_payload() {
        let err = validate_image(Some("image/png"), b"#!/bin/sh\necho hi", 1024).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
