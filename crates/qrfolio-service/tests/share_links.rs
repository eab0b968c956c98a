//! Share link lifecycle tests against the in-memory store and a manual clock.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use qrfolio_core::config::ShareConfig;
use qrfolio_core::error::{AppError, ErrorKind};
use qrfolio_core::result::AppResult;
use qrfolio_core::traits::{Clock, ManualClock};
use qrfolio_database::{MemoryShareLinkStore, ShareLinkStore};
use qrfolio_entity::share::{
    LinkType, NewShareLink, NewShareLinkLog, ShareLink, ShareLinkLog,
};
use qrfolio_service::share::IssueRequest;
use qrfolio_service::{LinkValidation, RejectReason, RequestContext, Requester, ShareLinkManager};

struct Harness {
    store: Arc<MemoryShareLinkStore>,
    clock: Arc<ManualClock>,
    manager: Arc<ShareLinkManager>,
    owner: RequestContext,
}

fn harness() -> Harness {
    let store = Arc::new(MemoryShareLinkStore::new());
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let config = ShareConfig {
        public_base_url: "https://pay.example.com/".to_string(),
        ..ShareConfig::default()
    };
    let manager = Arc::new(ShareLinkManager::new(store.clone(), clock.clone(), &config));
    Harness {
        store,
        clock,
        manager,
        owner: RequestContext::new(Uuid::new_v4(), "owner@example.com", false),
    }
}

fn visitor() -> Requester {
    Requester {
        ip_address: Some("203.0.113.7".to_string()),
        user_agent: Some("Mozilla/5.0".to_string()),
    }
}

#[tokio::test]
async fn unknown_token_is_not_found_without_mutation() {
    let h = harness();
    let issued = h
        .manager
        .issue(&h.owner, IssueRequest::OneTime)
        .await
        .unwrap();

    let outcome = h.manager.validate("no-such-token", &visitor()).await;
    assert_eq!(outcome, LinkValidation::Rejected(RejectReason::NotFound));

    let stored = h.store.get(issued.link.id).unwrap();
    assert_eq!(stored.access_count, 0);
    assert!(!stored.is_used());
    assert_eq!(h.store.len(), 1);
}

#[tokio::test]
async fn one_time_link_is_valid_exactly_once() {
    let h = harness();
    let issued = h
        .manager
        .issue(&h.owner, IssueRequest::OneTime)
        .await
        .unwrap();
    let token = issued.link.token.clone();

    let first = h.manager.validate(&token, &visitor()).await;
    let LinkValidation::Valid(link) = first else {
        panic!("expected valid, got {first:?}");
    };
    assert!(link.is_used());
    assert_eq!(link.access_count, 1);

    h.clock.advance(Duration::minutes(5));
    let second = h.manager.validate(&token, &visitor()).await;
    assert_eq!(second, LinkValidation::Rejected(RejectReason::AlreadyUsed));
    assert_eq!(h.store.get(link.id).unwrap().access_count, 1);
}

#[tokio::test]
async fn expired_link_is_rejected_without_counting() {
    let h = harness();
    let issued = h
        .manager
        .issue(&h.owner, IssueRequest::Expiring { expires_in_hours: 1 })
        .await
        .unwrap();

    h.clock.advance(Duration::hours(2));
    let outcome = h.manager.validate(&issued.link.token, &visitor()).await;
    assert_eq!(outcome, LinkValidation::Rejected(RejectReason::Expired));

    let stored = h.store.get(issued.link.id).unwrap();
    assert_eq!(stored.access_count, 0);
    assert_eq!(stored.last_accessed_at, None);
}

#[tokio::test]
async fn expiring_link_counts_every_access() {
    let h = harness();
    let issued = h
        .manager
        .issue(&h.owner, IssueRequest::Expiring { expires_in_hours: 48 })
        .await
        .unwrap();

    for expected in 1..=3 {
        h.clock.advance(Duration::minutes(10));
        match h.manager.validate(&issued.link.token, &visitor()).await {
            LinkValidation::Valid(link) => {
                assert_eq!(link.access_count, expected);
                assert_eq!(link.last_accessed_at, Some(h.clock.now()));
                assert!(!link.is_used());
            }
            other => panic!("expected valid, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn deadline_is_inclusive() {
    let h = harness();
    let issued = h
        .manager
        .issue(&h.owner, IssueRequest::Expiring { expires_in_hours: 1 })
        .await
        .unwrap();

    h.clock.advance(Duration::hours(1));
    assert!(h.manager.validate(&issued.link.token, &visitor()).await.is_valid());

    h.clock.advance(Duration::milliseconds(1));
    assert_eq!(
        h.manager.validate(&issued.link.token, &visitor()).await.reason(),
        Some(RejectReason::Expired)
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_redemptions_of_one_time_link_yield_one_winner() {
    let h = harness();
    let issued = h
        .manager
        .issue(&h.owner, IssueRequest::OneTime)
        .await
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..50 {
        let manager = h.manager.clone();
        let token = issued.link.token.clone();
        handles.push(tokio::spawn(async move {
            manager.validate(&token, &Requester::default()).await
        }));
    }

    let mut valid = 0;
    for handle in handles {
        match handle.await.unwrap() {
            LinkValidation::Valid(_) => valid += 1,
            LinkValidation::Rejected(reason) => assert_eq!(reason, RejectReason::AlreadyUsed),
        }
    }

    assert_eq!(valid, 1);
    assert_eq!(h.store.get(issued.link.id).unwrap().access_count, 1);
}

#[tokio::test]
async fn issue_then_validate_records_access() {
    let h = harness();
    let start = h.clock.now();
    let issued = h
        .manager
        .issue(&h.owner, IssueRequest::Expiring { expires_in_hours: 24 })
        .await
        .unwrap();

    assert_eq!(
        issued.url,
        format!("https://pay.example.com/share/{}", issued.link.token)
    );
    assert_eq!(issued.link.link_type(), LinkType::Expiring);
    assert_eq!(issued.link.expires_at(), Some(start + Duration::hours(24)));
    assert_eq!(issued.link.user_id, h.owner.user_id);

    let outcome = h.manager.validate(&issued.link.token, &visitor()).await;
    let LinkValidation::Valid(link) = outcome else {
        panic!("expected valid");
    };
    assert_eq!(link.access_count, 1);
    assert_eq!(link.last_accessed_at, Some(start));
}

#[tokio::test]
async fn expiry_bounds_are_enforced() {
    let h = harness();
    for hours in [0, -1, 721] {
        let err = h
            .manager
            .issue(&h.owner, IssueRequest::Expiring { expires_in_hours: hours })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
    assert!(h.store.is_empty());

    for hours in [1, 720] {
        h.manager
            .issue(&h.owner, IssueRequest::Expiring { expires_in_hours: hours })
            .await
            .unwrap();
    }
    assert_eq!(h.store.len(), 2);
}

#[tokio::test]
async fn one_time_links_ignore_expiry_hours() {
    let request = IssueRequest::from_parts(LinkType::OneTime, Some(5)).unwrap();
    assert_eq!(request, IssueRequest::OneTime);

    let err = IssueRequest::from_parts(LinkType::Expiring, None).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    let h = harness();
    let issued = h.manager.issue(&h.owner, request).await.unwrap();
    assert_eq!(issued.link.expires_at(), None);

    h.clock.advance(Duration::days(400));
    assert!(h.manager.validate(&issued.link.token, &visitor()).await.is_valid());
}

#[tokio::test]
async fn revoke_is_owner_scoped() {
    let h = harness();
    let issued = h
        .manager
        .issue(&h.owner, IssueRequest::OneTime)
        .await
        .unwrap();

    let stranger = RequestContext::new(Uuid::new_v4(), "stranger@example.com", false);
    h.manager.revoke(&stranger, issued.link.id).await.unwrap();
    assert!(h.store.get(issued.link.id).is_some());

    h.manager.revoke(&h.owner, issued.link.id).await.unwrap();
    assert!(h.store.get(issued.link.id).is_none());
    assert_eq!(
        h.manager.validate(&issued.link.token, &visitor()).await,
        LinkValidation::Rejected(RejectReason::NotFound)
    );

    // Revoking again is a no-op.
    h.manager.revoke(&h.owner, issued.link.id).await.unwrap();
}

#[tokio::test]
async fn list_returns_only_own_links_newest_first() {
    let h = harness();
    let older = h
        .manager
        .issue(&h.owner, IssueRequest::OneTime)
        .await
        .unwrap();
    h.clock.advance(Duration::seconds(1));
    let newer = h
        .manager
        .issue(&h.owner, IssueRequest::Expiring { expires_in_hours: 2 })
        .await
        .unwrap();

    let stranger = RequestContext::new(Uuid::new_v4(), "stranger@example.com", false);
    h.manager
        .issue(&stranger, IssueRequest::OneTime)
        .await
        .unwrap();

    let listed = h.manager.list(&h.owner).await.unwrap();
    let ids: Vec<Uuid> = listed.iter().map(|l| l.link.id).collect();
    assert_eq!(ids, vec![newer.link.id, older.link.id]);
    assert!(listed[0].url.ends_with(&newer.link.token));
}

#[tokio::test]
async fn access_log_written_only_with_requester_metadata() {
    let h = harness();
    let issued = h
        .manager
        .issue(&h.owner, IssueRequest::Expiring { expires_in_hours: 5 })
        .await
        .unwrap();

    h.manager
        .validate(&issued.link.token, &Requester::default())
        .await;
    assert!(h.manager.access_logs(&h.owner, issued.link.id).await.unwrap().is_empty());

    h.manager.validate(&issued.link.token, &visitor()).await;
    let logs = h.manager.access_logs(&h.owner, issued.link.id).await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].ip_address.as_deref(), Some("203.0.113.7"));
    assert_eq!(logs[0].user_agent.as_deref(), Some("Mozilla/5.0"));

    let stranger = RequestContext::new(Uuid::new_v4(), "stranger@example.com", false);
    let err = h
        .manager
        .access_logs(&stranger, issued.link.id)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

/// Which store call fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fault {
    Lookup,
    Insert,
    AppendLog,
}

/// In-memory store with one call wired to fail, standing in for an
/// unreachable database.
#[derive(Debug)]
struct FaultyStore {
    inner: MemoryShareLinkStore,
    fault: Fault,
}

impl FaultyStore {
    fn new(fault: Fault) -> Self {
        Self {
            inner: MemoryShareLinkStore::new(),
            fault,
        }
    }

    fn fail_if(&self, fault: Fault) -> AppResult<()> {
        if self.fault == fault {
            return Err(AppError::database("connection refused"));
        }
        Ok(())
    }
}

#[async_trait]
impl ShareLinkStore for FaultyStore {
    async fn insert(&self, data: &NewShareLink) -> AppResult<ShareLink> {
        self.fail_if(Fault::Insert)?;
        self.inner.insert(data).await
    }

    async fn find_by_token(&self, token: &str) -> AppResult<Option<ShareLink>> {
        self.fail_if(Fault::Lookup)?;
        self.inner.find_by_token(token).await
    }

    async fn find_owned(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<ShareLink>> {
        self.inner.find_owned(id, owner_id).await
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<ShareLink>> {
        self.inner.list_by_owner(owner_id).await
    }

    async fn record_access(&self, id: Uuid, now: DateTime<Utc>) -> AppResult<Option<ShareLink>> {
        self.inner.record_access(id, now).await
    }

    async fn delete_owned(&self, id: Uuid, owner_id: Uuid) -> AppResult<bool> {
        self.inner.delete_owned(id, owner_id).await
    }

    async fn append_log(&self, entry: &NewShareLinkLog) -> AppResult<ShareLinkLog> {
        self.fail_if(Fault::AppendLog)?;
        self.inner.append_log(entry).await
    }

    async fn list_logs(&self, link_id: Uuid) -> AppResult<Vec<ShareLinkLog>> {
        self.inner.list_logs(link_id).await
    }
}

fn faulty_manager(fault: Fault) -> (Arc<FaultyStore>, ShareLinkManager) {
    let store = Arc::new(FaultyStore::new(fault));
    let manager = ShareLinkManager::new(
        store.clone(),
        Arc::new(ManualClock::default()),
        &ShareConfig::default(),
    );
    (store, manager)
}

#[tokio::test]
async fn store_failure_maps_to_validation_error() {
    let (_, manager) = faulty_manager(Fault::Lookup);
    let owner = RequestContext::new(Uuid::new_v4(), "owner@example.com", false);
    let issued = manager.issue(&owner, IssueRequest::OneTime).await.unwrap();

    assert_eq!(
        manager.validate(&issued.link.token, &visitor()).await,
        LinkValidation::Rejected(RejectReason::ValidationError)
    );
}

#[tokio::test]
async fn failed_access_log_keeps_redemption_valid() {
    let (store, manager) = faulty_manager(Fault::AppendLog);
    let owner = RequestContext::new(Uuid::new_v4(), "owner@example.com", false);
    let issued = manager.issue(&owner, IssueRequest::OneTime).await.unwrap();

    let LinkValidation::Valid(link) = manager.validate(&issued.link.token, &visitor()).await
    else {
        panic!("redemption should succeed when only the log write fails");
    };
    assert_eq!(link.access_count, 1);
    assert!(store.list_logs(link.id).await.unwrap().is_empty());

    assert_eq!(
        manager.validate(&issued.link.token, &visitor()).await,
        LinkValidation::Rejected(RejectReason::AlreadyUsed)
    );
}

#[tokio::test]
async fn failed_insert_issues_nothing() {
    let (store, manager) = faulty_manager(Fault::Insert);
    let owner = RequestContext::new(Uuid::new_v4(), "owner@example.com", false);

    for request in [
        IssueRequest::OneTime,
        IssueRequest::Expiring {
            expires_in_hours: 24,
        },
    ] {
        let err = manager.issue(&owner, request).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Database);
    }
    assert!(store.list_by_owner(owner.user_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn oversized_expiry_ceiling_is_clamped() {
    let store = Arc::new(MemoryShareLinkStore::new());
    let config = ShareConfig {
        max_expiry_hours: i64::MAX,
        ..ShareConfig::default()
    };
    let manager = ShareLinkManager::new(store.clone(), Arc::new(ManualClock::default()), &config);
    let owner = RequestContext::new(Uuid::new_v4(), "owner@example.com", false);

    let err = manager
        .issue(
            &owner,
            IssueRequest::Expiring {
                expires_in_hours: i64::MAX / 2,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert!(store.list_by_owner(owner.user_id).await.unwrap().is_empty());

    let issued = manager
        .issue(
            &owner,
            IssueRequest::Expiring {
                expires_in_hours: config.effective_max_expiry_hours(),
            },
        )
        .await
        .unwrap();
    assert!(issued.link.expires_at().is_some());
}
