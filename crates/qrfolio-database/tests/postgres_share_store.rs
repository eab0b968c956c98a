//! Share link store tests against a live Postgres.
//!
//! Skipped unless `DATABASE_URL` points at a database the test may migrate.

use std::sync::Arc;

use chrono::{Duration, Utc};
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use qrfolio_database::migration::run_migrations;
use qrfolio_database::repositories::UserRepository;
use qrfolio_database::{ShareLinkRepository, ShareLinkStore};
use qrfolio_entity::share::{LinkType, NewShareLink, ShareLink};
use qrfolio_entity::user::CreateUser;

async fn repository() -> Option<(ShareLinkRepository, Uuid)> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping Postgres share store test");
        return None;
    };
    let pool = PgPoolOptions::new()
        .max_connections(16)
        .connect(&url)
        .await
        .unwrap();
    run_migrations(&pool).await.unwrap();

    let owner = UserRepository::new(pool.clone())
        .create(&CreateUser {
            email: format!("store-{}@example.com", Uuid::new_v4()),
            name: "Store Test".to_string(),
            password_hash: "not-a-hash".to_string(),
            is_admin: false,
            registration_phrase_id: None,
        })
        .await
        .unwrap();
    Some((ShareLinkRepository::new(pool), owner.id))
}

async fn insert(
    repo: &ShareLinkRepository,
    owner: Uuid,
    link_type: LinkType,
    expires_in: Option<Duration>,
) -> ShareLink {
    let now = Utc::now();
    repo.insert(&NewShareLink {
        user_id: owner,
        token: Uuid::new_v4().simple().to_string(),
        link_type,
        expires_at: expires_in.map(|d| now + d),
        created_at: now,
    })
    .await
    .unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn one_time_link_redeems_once_under_contention() {
    let Some((repo, owner)) = repository().await else {
        return;
    };
    let repo = Arc::new(repo);
    let link = insert(&repo, owner, LinkType::OneTime, None).await;

    let mut handles = Vec::new();
    for _ in 0..50 {
        let repo = Arc::clone(&repo);
        handles.push(tokio::spawn(async move {
            repo.record_access(link.id, Utc::now()).await.unwrap()
        }));
    }

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap().is_some() {
            winners += 1;
        }
    }
    assert_eq!(winners, 1);

    let stored = repo.find_by_token(&link.token).await.unwrap().unwrap();
    assert!(stored.is_used());
    assert_eq!(stored.access_count, 1);
}

#[tokio::test]
async fn expiring_link_stops_redeeming_after_deadline() {
    let Some((repo, owner)) = repository().await else {
        return;
    };
    let link = insert(&repo, owner, LinkType::Expiring, Some(Duration::hours(1))).await;
    let deadline = link.expires_at().unwrap();

    let first = repo.record_access(link.id, deadline).await.unwrap().unwrap();
    assert_eq!(first.access_count, 1);
    let second = repo.record_access(link.id, deadline).await.unwrap().unwrap();
    assert_eq!(second.access_count, 2);

    let late = deadline + Duration::seconds(1);
    assert!(repo.record_access(link.id, late).await.unwrap().is_none());
    assert_eq!(
        repo.find_by_token(&link.token).await.unwrap().unwrap().access_count,
        2
    );
}
