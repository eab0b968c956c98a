//! Share link entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Discriminant stored in the `link_type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "share_link_type", rename_all = "snake_case")]
#[serde(rename_all = "kebab-case")]
pub enum LinkType {
    /// Reusable until a deadline.
    Expiring,
    /// Valid for exactly one successful access.
    OneTime,
}

impl LinkType {
    /// Return the wire name (`"expiring"` / `"one-time"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expiring => "expiring",
            Self::OneTime => "one-time",
        }
    }
}

impl std::fmt::Display for LinkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw `share_links` row.
///
/// The flat columns allow combinations the domain forbids; convert into
/// [`ShareLink`] before making decisions.
#[derive(Debug, Clone, FromRow)]
pub struct ShareLinkRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token: String,
    pub link_type: LinkType,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_used: bool,
    pub used_at: Option<DateTime<Utc>>,
    pub access_count: i32,
    pub last_accessed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Type-specific state of a link. Each variant carries only the field that
/// governs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "linkType", rename_all = "kebab-case")]
pub enum LinkKind {
    /// Valid until `expires_at`; `None` never expires.
    #[serde(rename_all = "camelCase")]
    Expiring {
        /// Deadline.
        expires_at: Option<DateTime<Utc>>,
    },
    /// Consumed once `used_at` is set.
    #[serde(rename_all = "camelCase")]
    OneTime {
        /// When the single use happened.
        used_at: Option<DateTime<Utc>>,
    },
}

/// Where a link sits in its lifecycle at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkState {
    /// Redeemable.
    Active,
    /// One-time link already redeemed.
    Consumed,
    /// Expiring link past its deadline.
    Expired,
}

/// A shareable capability granting public read access to the owner's active
/// QR codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareLink {
    /// Unique link identifier.
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// URL-safe random token.
    pub token: String,
    /// Type-specific state.
    #[serde(flatten)]
    pub kind: LinkKind,
    /// Number of successful validations.
    pub access_count: i32,
    /// Time of the last successful validation.
    pub last_accessed_at: Option<DateTime<Utc>>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl ShareLink {
    /// The stored discriminant.
    pub fn link_type(&self) -> LinkType {
        match self.kind {
            LinkKind::Expiring { .. } => LinkType::Expiring,
            LinkKind::OneTime { .. } => LinkType::OneTime,
        }
    }

    /// Deadline of an expiring link.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        match self.kind {
            LinkKind::Expiring { expires_at } => expires_at,
            LinkKind::OneTime { .. } => None,
        }
    }

    /// Whether a one-time link has been redeemed. Always `false` for expiring links.
    pub fn is_used(&self) -> bool {
        matches!(self.kind, LinkKind::OneTime { used_at: Some(_) })
    }

    /// Evaluate the lifecycle state at `now`.
    ///
    /// The type decides which field is consulted. Expiry is strict: a link
    /// whose deadline equals `now` is still active.
    pub fn state_at(&self, now: DateTime<Utc>) -> LinkState {
        match self.kind {
            LinkKind::OneTime { used_at: Some(_) } => LinkState::Consumed,
            LinkKind::OneTime { used_at: None } => LinkState::Active,
            LinkKind::Expiring {
                expires_at: Some(deadline),
            } if deadline < now => LinkState::Expired,
            LinkKind::Expiring { .. } => LinkState::Active,
        }
    }
}

impl From<ShareLinkRow> for ShareLink {
    fn from(row: ShareLinkRow) -> Self {
        let kind = match row.link_type {
            LinkType::Expiring => LinkKind::Expiring {
                expires_at: row.expires_at,
            },
            // A used row without a timestamp still counts as used.
            LinkType::OneTime => LinkKind::OneTime {
                used_at: if row.is_used {
                    Some(
                        row.used_at
                            .or(row.last_accessed_at)
                            .unwrap_or(row.created_at),
                    )
                } else {
                    None
                },
            },
        };

        Self {
            id: row.id,
            user_id: row.user_id,
            token: row.token,
            kind,
            access_count: row.access_count,
            last_accessed_at: row.last_accessed_at,
            created_at: row.created_at,
        }
    }
}

/// Data required to persist a new share link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewShareLink {
    /// Owning user.
    pub user_id: Uuid,
    /// Generated token.
    pub token: String,
    /// Link type.
    pub link_type: LinkType,
    /// Deadline (expiring links only).
    pub expires_at: Option<DateTime<Utc>>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn row(link_type: LinkType) -> ShareLinkRow {
        ShareLinkRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            token: "tok".to_string(),
            link_type,
            expires_at: None,
            is_used: false,
            used_at: None,
            access_count: 0,
            last_accessed_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_one_time_ignores_expiry_column() {
        let mut raw = row(LinkType::OneTime);
        raw.expires_at = Some(Utc::now() - Duration::hours(5));
        let link = ShareLink::from(raw);

        assert_eq!(link.expires_at(), None);
        assert_eq!(link.state_at(Utc::now()), LinkState::Active);
    }

    #[test]
    fn test_expiring_ignores_used_flag() {
        let mut raw = row(LinkType::Expiring);
        raw.is_used = true;
        raw.used_at = Some(Utc::now());
        let link = ShareLink::from(raw);

        assert!(!link.is_used());
        assert_eq!(link.state_at(Utc::now()), LinkState::Active);
    }

    #[test]
    fn test_used_without_timestamp_is_consumed() {
        let mut raw = row(LinkType::OneTime);
        raw.is_used = true;
        let link = ShareLink::from(raw);
        assert!(link.is_used());
        assert_eq!(link.state_at(Utc::now()), LinkState::Consumed);
    }

    #[test]
    fn test_expiry_is_strict() {
        let now = Utc::now();
        let mut raw = row(LinkType::Expiring);
        raw.expires_at = Some(now);
        let link = ShareLink::from(raw);

        assert_eq!(link.state_at(now), LinkState::Active);
        assert_eq!(
            link.state_at(now + Duration::milliseconds(1)),
            LinkState::Expired
        );
    }

    #[test]
    fn test_serialized_shape() {
        let mut raw = row(LinkType::OneTime);
        raw.token = "abc".to_string();
        let link = ShareLink::from(raw);
        let json = serde_json::to_value(&link).unwrap();

        assert_eq!(json["linkType"], "one-time");
        assert_eq!(json["token"], "abc");
        assert!(json["usedAt"].is_null());
        assert_eq!(json["accessCount"], 0);
    }
}
