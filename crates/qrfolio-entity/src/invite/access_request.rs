//! Access request entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Review state of an access request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "access_request_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AccessRequestStatus {
    Pending,
    Approved,
    Rejected,
}

/// A prospective user asking an administrator for an invite.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AccessRequest {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub reason: Option<String>,
    pub status: AccessRequestStatus,
    /// Email of the reviewing administrator.
    pub reviewed_by: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Data required to file an access request.
#[derive(Debug, Clone)]
pub struct CreateAccessRequest {
    pub email: String,
    pub name: String,
    pub reason: Option<String>,
}
