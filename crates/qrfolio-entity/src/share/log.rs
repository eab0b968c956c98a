//! Share link access log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One successful access through a share link. Never updated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ShareLinkLog {
    /// Log row ID.
    pub id: Uuid,
    /// The link that was accessed.
    pub share_link_id: Uuid,
    /// Requester IP address, if known.
    pub ip_address: Option<String>,
    /// Requester user agent, if known.
    pub user_agent: Option<String>,
    /// When the access happened.
    pub accessed_at: DateTime<Utc>,
}

/// Data required to append an access log row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewShareLinkLog {
    /// The link that was accessed.
    pub share_link_id: Uuid,
    /// Requester IP address.
    pub ip_address: Option<String>,
    /// Requester user agent.
    pub user_agent: Option<String>,
    /// Access time.
    pub accessed_at: DateTime<Utc>,
}
