//! Persistence contract for share links and their access logs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use qrfolio_core::result::AppResult;
use qrfolio_entity::share::{NewShareLink, NewShareLinkLog, ShareLink, ShareLinkLog};

/// Storage backend for share links.
///
/// Implementations must make [`record_access`](ShareLinkStore::record_access)
/// a single atomic check-and-set: concurrent calls on a fresh one-time link
/// yield exactly one `Some`.
#[async_trait]
pub trait ShareLinkStore: Send + Sync + std::fmt::Debug + 'static {
    /// Persist a new link. Fails with `Conflict` on a duplicate token.
    async fn insert(&self, data: &NewShareLink) -> AppResult<ShareLink>;

    /// Look up a link by its token.
    async fn find_by_token(&self, token: &str) -> AppResult<Option<ShareLink>>;

    /// Look up a link by id, only if `owner_id` owns it.
    async fn find_owned(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<ShareLink>>;

    /// List an owner's links, newest first.
    async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<ShareLink>>;

    /// Redeem the link at `now` if it is still redeemable.
    ///
    /// Increments `access_count`, sets `last_accessed_at` and, for one-time
    /// links, marks the link used. Returns the updated link, or `None` when
    /// the link is gone, consumed, or past its deadline.
    async fn record_access(&self, id: Uuid, now: DateTime<Utc>) -> AppResult<Option<ShareLink>>;

    /// Delete a link owned by `owner_id`. Returns whether a row was removed.
    async fn delete_owned(&self, id: Uuid, owner_id: Uuid) -> AppResult<bool>;

    /// Append an access log entry.
    async fn append_log(&self, entry: &NewShareLinkLog) -> AppResult<ShareLinkLog>;

    /// List a link's access log, newest first.
    async fn list_logs(&self, link_id: Uuid) -> AppResult<Vec<ShareLinkLog>>;
}
