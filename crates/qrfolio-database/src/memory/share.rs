//! In-memory share link store backed by `dashmap`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use qrfolio_core::error::AppError;
use qrfolio_core::result::AppResult;
use qrfolio_entity::share::{
    LinkKind, LinkState, LinkType, NewShareLink, NewShareLinkLog, ShareLink, ShareLinkLog,
};

use crate::store::ShareLinkStore;

/// [`ShareLinkStore`] held entirely in process memory.
///
/// Redemption runs its check-and-set while holding the entry's shard write
/// lock, so concurrent redemptions of one link are serialized.
#[derive(Debug, Clone, Default)]
pub struct MemoryShareLinkStore {
    links: Arc<DashMap<Uuid, ShareLink>>,
    tokens: Arc<DashMap<String, Uuid>>,
    logs: Arc<DashMap<Uuid, Vec<ShareLinkLog>>>,
}

impl MemoryShareLinkStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored links.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether the store holds no links.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Snapshot a link by id.
    pub fn get(&self, id: Uuid) -> Option<ShareLink> {
        self.links.get(&id).map(|entry| entry.value().clone())
    }
}

#[async_trait]
impl ShareLinkStore for MemoryShareLinkStore {
    async fn insert(&self, data: &NewShareLink) -> AppResult<ShareLink> {
        let id = Uuid::new_v4();
        match self.tokens.entry(data.token.clone()) {
            Entry::Occupied(_) => return Err(AppError::conflict("Share token already exists")),
            Entry::Vacant(slot) => {
                slot.insert(id);
            }
        }

        let kind = match data.link_type {
            LinkType::Expiring => LinkKind::Expiring {
                expires_at: data.expires_at,
            },
            LinkType::OneTime => LinkKind::OneTime { used_at: None },
        };
        let link = ShareLink {
            id,
            user_id: data.user_id,
            token: data.token.clone(),
            kind,
            access_count: 0,
            last_accessed_at: None,
            created_at: data.created_at,
        };
        self.links.insert(id, link.clone());
        Ok(link)
    }

    async fn find_by_token(&self, token: &str) -> AppResult<Option<ShareLink>> {
        let Some(id) = self.tokens.get(token).map(|entry| *entry.value()) else {
            return Ok(None);
        };
        Ok(self.get(id))
    }

    async fn find_owned(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<ShareLink>> {
        Ok(self.get(id).filter(|link| link.user_id == owner_id))
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<ShareLink>> {
        let mut links: Vec<ShareLink> = self
            .links
            .iter()
            .filter(|entry| entry.user_id == owner_id)
            .map(|entry| entry.value().clone())
            .collect();
        links.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(links)
    }

    async fn record_access(&self, id: Uuid, now: DateTime<Utc>) -> AppResult<Option<ShareLink>> {
        let Some(mut entry) = self.links.get_mut(&id) else {
            return Ok(None);
        };
        let link = entry.value_mut();
        if link.state_at(now) != LinkState::Active {
            return Ok(None);
        }

        link.access_count += 1;
        link.last_accessed_at = Some(now);
        if let LinkKind::OneTime { used_at } = &mut link.kind {
            *used_at = Some(now);
        }
        Ok(Some(link.clone()))
    }

    async fn delete_owned(&self, id: Uuid, owner_id: Uuid) -> AppResult<bool> {
        let Some((_, link)) = self.links.remove_if(&id, |_, link| link.user_id == owner_id) else {
            return Ok(false);
        };
        self.tokens.remove(&link.token);
        self.logs.remove(&id);
        Ok(true)
    }

    async fn append_log(&self, entry: &NewShareLinkLog) -> AppResult<ShareLinkLog> {
        if !self.links.contains_key(&entry.share_link_id) {
            return Err(AppError::not_found("Share link not found"));
        }
        let log = ShareLinkLog {
            id: Uuid::new_v4(),
            share_link_id: entry.share_link_id,
            ip_address: entry.ip_address.clone(),
            user_agent: entry.user_agent.clone(),
            accessed_at: entry.accessed_at,
        };
        self.logs
            .entry(entry.share_link_id)
            .or_default()
            .push(log.clone());
        Ok(log)
    }

    async fn list_logs(&self, link_id: Uuid) -> AppResult<Vec<ShareLinkLog>> {
        let mut logs = self
            .logs
            .get(&link_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default();
        logs.sort_by(|a, b| b.accessed_at.cmp(&a.accessed_at));
        Ok(logs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use qrfolio_core::error::ErrorKind;

    fn new_link(token: &str, link_type: LinkType, expires_at: Option<DateTime<Utc>>) -> NewShareLink {
        NewShareLink {
            user_id: Uuid::new_v4(),
            token: token.to_string(),
            link_type,
            expires_at,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_token_conflicts() {
        let store = MemoryShareLinkStore::new();
        store
            .insert(&new_link("dup", LinkType::OneTime, None))
            .await
            .unwrap();
        let err = store
            .insert(&new_link("dup", LinkType::OneTime, None))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_record_access_consumes_one_time() {
        let store = MemoryShareLinkStore::new();
        let link = store
            .insert(&new_link("once", LinkType::OneTime, None))
            .await
            .unwrap();
        let now = Utc::now();

        let first = store.record_access(link.id, now).await.unwrap().unwrap();
        assert!(first.is_used());
        assert_eq!(first.access_count, 1);
        assert_eq!(first.last_accessed_at, Some(now));

        assert!(store.record_access(link.id, now).await.unwrap().is_none());
        assert_eq!(store.get(link.id).unwrap().access_count, 1);
    }

    #[tokio::test]
    async fn test_record_access_refuses_expired() {
        let store = MemoryShareLinkStore::new();
        let now = Utc::now();
        let link = store
            .insert(&new_link("old", LinkType::Expiring, Some(now - Duration::seconds(1))))
            .await
            .unwrap();

        assert!(store.record_access(link.id, now).await.unwrap().is_none());
        assert_eq!(store.get(link.id).unwrap().access_count, 0);
    }

    #[tokio::test]
    async fn test_delete_requires_owner() {
        let store = MemoryShareLinkStore::new();
        let link = store
            .insert(&new_link("mine", LinkType::Expiring, None))
            .await
            .unwrap();

        assert!(!store.delete_owned(link.id, Uuid::new_v4()).await.unwrap());
        assert!(store.find_by_token("mine").await.unwrap().is_some());

        assert!(store.delete_owned(link.id, link.user_id).await.unwrap());
        assert!(store.find_by_token("mine").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_logs_newest_first() {
        let store = MemoryShareLinkStore::new();
        let link = store
            .insert(&new_link("logged", LinkType::Expiring, None))
            .await
            .unwrap();
        let t0 = Utc::now();
        for offset in 0..3 {
            store
                .append_log(&NewShareLinkLog {
                    share_link_id: link.id,
                    ip_address: Some(format!("10.0.0.{offset}")),
                    user_agent: None,
                    accessed_at: t0 + Duration::seconds(offset),
                })
                .await
                .unwrap();
        }

        let logs = store.list_logs(link.id).await.unwrap();
        assert_eq!(logs.len(), 3);
        assert_eq!(logs[0].ip_address.as_deref(), Some("10.0.0.2"));
    }
}
