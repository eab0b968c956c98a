//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered account owning QR codes, settings and share links.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Login email (unique, stored lowercase).
    pub email: String,
    /// Display name.
    pub name: String,
    /// Argon2 password hash (never serialized).
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Whether the user may manage phrases and access requests.
    pub is_admin: bool,
    /// The registration phrase consumed at sign-up.
    pub registration_phrase_id: Option<Uuid>,
    /// Account creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Login email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Admin flag.
    pub is_admin: bool,
    /// Phrase consumed during registration, if any.
    pub registration_phrase_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User {
            id: Uuid::new_v4(),
            email: "a@example.com".to_string(),
            name: "A".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            is_admin: false,
            registration_phrase_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2"));
        assert!(json.contains("isAdmin"));
    }
}
