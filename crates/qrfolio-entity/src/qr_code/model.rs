//! QR code entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An uploaded payment QR image with its labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct QrCode {
    /// Unique QR code identifier.
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// Title shown on the public page.
    pub title: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Public URL of the stored image.
    pub image_url: String,
    /// Account holder label.
    pub account_name: Option<String>,
    /// Account number label.
    pub account_number: Option<String>,
    /// Ascending presentation order.
    pub display_order: i32,
    /// Inactive codes are hidden from public pages.
    pub is_active: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

/// Data required to insert a QR code.
#[derive(Debug, Clone)]
pub struct CreateQrCode {
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    pub account_name: Option<String>,
    pub account_number: Option<String>,
    /// Position appended after the owner's current maximum.
    pub display_order: i32,
}

/// Partial update of a QR code. `None` leaves the column unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQrCode {
    pub title: Option<String>,
    pub description: Option<String>,
    pub account_name: Option<String>,
    pub account_number: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateQrCode {
    /// Whether the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.account_name.is_none()
            && self.account_number.is_none()
            && self.is_active.is_none()
    }
}
