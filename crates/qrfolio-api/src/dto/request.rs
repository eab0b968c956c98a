//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use qrfolio_core::error::AppError;
use qrfolio_entity::settings::DisplayStyle;
use qrfolio_entity::share::LinkType;
use qrfolio_service::admin::ReviewDecision;

/// Run derive-based validation, reporting the first failing field.
pub fn validated<T: Validate>(body: T) -> Result<T, AppError> {
    body.validate().map_err(first_error)?;
    Ok(body)
}

fn first_error(errors: ValidationErrors) -> AppError {
    let message = errors
        .field_errors()
        .into_iter()
        .min_by(|a, b| a.0.cmp(&b.0))
        .and_then(|(field, errs)| {
            errs.first().map(|e| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .unwrap_or_else(|| "Invalid input data".to_string());
    AppError::validation(message)
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Access request form.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AccessRequestBody {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(max = 2000, message = "Reason is too long"))]
    pub reason: Option<String>,
}

/// `POST /api/share-links`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShareLinkRequest {
    pub link_type: LinkType,
    /// Lifetime in hours (expiring links only).
    pub expires_in: Option<i64>,
}

/// `POST /api/qr-codes`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQrCodeRequest {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(min = 1, message = "Image is required"))]
    pub image_url: String,
    pub account_name: Option<String>,
    pub account_number: Option<String>,
}

/// `PUT /api/qr-codes/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQrCodeRequest {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub account_name: Option<String>,
    pub account_number: Option<String>,
    pub is_active: Option<bool>,
}

/// One entry of `PUT /api/qr-codes/order`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodePosition {
    pub id: Uuid,
    pub display_order: i32,
}

/// `PUT /api/qr-codes/order`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    pub items: Vec<QrCodePosition>,
}

/// `PUT /api/settings`. Colors are checked by the settings service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    pub display_style: Option<DisplayStyle>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub background_color: Option<String>,
    #[validate(length(max = 20000, message = "Custom CSS is too long"))]
    pub custom_css: Option<String>,
    pub show_account_details: Option<bool>,
    #[validate(length(max = 200, message = "Page title is too long"))]
    pub page_title: Option<String>,
    #[validate(length(max = 1000, message = "Page description is too long"))]
    pub page_description: Option<String>,
}

/// `POST /api/admin/phrases`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePhraseRequest {
    #[validate(range(min = 1, message = "expiresIn must be at least 1 hour"))]
    pub expires_in: Option<i64>,
}

/// `PUT /api/admin/access-requests/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub status: ReviewDecision,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_error_message() {
        let err = validated(LoginRequest {
            email: "nope".to_string(),
            password: "x".to_string(),
        })
        .unwrap_err();
        assert_eq!(err.message, "Invalid email address");
    }

    #[test]
    fn test_share_link_request_wire_names() {
        let req: CreateShareLinkRequest =
            serde_json::from_str(r#"{"linkType":"one-time"}"#).unwrap();
        assert_eq!(req.link_type, LinkType::OneTime);
        assert_eq!(req.expires_in, None);

        let req: CreateShareLinkRequest =
            serde_json::from_str(r#"{"linkType":"expiring","expiresIn":24}"#).unwrap();
        assert_eq!(req.expires_in, Some(24));
    }

    #[test]
    fn test_phrase_range() {
        assert!(validated(GeneratePhraseRequest { expires_in: Some(0) }).is_err());
        assert!(validated(GeneratePhraseRequest { expires_in: None }).is_ok());
    }
}
