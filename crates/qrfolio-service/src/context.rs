//! Who is calling.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The authenticated caller of an owner or admin operation.
///
/// Built by the API's auth extractor from verified JWT claims; services
/// scope every read and write to `user_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// Account email from the token.
    pub email: String,
    /// Admin flag from the token.
    pub is_admin: bool,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, email: impl Into<String>, is_admin: bool) -> Self {
        Self {
            user_id,
            email: email.into(),
            is_admin,
        }
    }
}

/// Anonymous visitor metadata recorded when a share link is redeemed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requester {
    /// Client IP (first `x-forwarded-for` hop or `x-real-ip`).
    pub ip_address: Option<String>,
    /// `User-Agent` header.
    pub user_agent: Option<String>,
}

impl Requester {
    /// Whether there is anything worth logging.
    pub fn is_empty(&self) -> bool {
        self.ip_address.is_none() && self.user_agent.is_none()
    }
}
