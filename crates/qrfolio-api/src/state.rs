//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use qrfolio_auth::{JwtDecoder, JwtEncoder, PasswordHasher, PasswordPolicy};
use qrfolio_core::config::AppConfig;
use qrfolio_core::traits::{BlobStore, Clock, Mailer};
use qrfolio_database::repositories::{
    AccessRequestRepository, PhraseRepository, QrCodeRepository, SettingsRepository,
    UserRepository,
};
use qrfolio_database::{DatabasePool, ShareLinkStore};
use qrfolio_service::{
    AccessRequestService, AccountService, AdminService, NotificationService, PublicPageService,
    QrCodeService, SettingsService, ShareLinkManager,
};

/// Backends that differ between production and tests.
#[derive(Debug, Clone)]
pub struct Collaborators {
    /// Share link persistence.
    pub share_store: Arc<dyn ShareLinkStore>,
    /// Image storage.
    pub blobs: Arc<dyn BlobStore>,
    /// Outbound email.
    pub mailer: Arc<dyn Mailer>,
    /// Time source.
    pub clock: Arc<dyn Clock>,
}

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool
    pub db: DatabasePool,
    /// Uploaded image storage
    pub blobs: Arc<dyn BlobStore>,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,
    /// User repository, used to re-check admin status
    pub user_repo: Arc<UserRepository>,

    // ── Services ─────────────────────────────────────────────
    /// Registration and login
    pub accounts: Arc<AccountService>,
    /// Share link lifecycle
    pub share_links: Arc<ShareLinkManager>,
    /// Public share page assembly
    pub public_pages: Arc<PublicPageService>,
    /// QR code management
    pub qr_codes: Arc<QrCodeService>,
    /// Appearance settings
    pub settings: Arc<SettingsService>,
    /// Phrase and access request administration
    pub admin: Arc<AdminService>,
    /// Public access request intake
    pub access_requests: Arc<AccessRequestService>,
}

impl AppState {
    /// Build repositories and services on top of an open pool.
    pub fn assemble(config: AppConfig, db: DatabasePool, collaborators: Collaborators) -> Self {
        let Collaborators {
            share_store,
            blobs,
            mailer,
            clock,
        } = collaborators;
        let pool = db.pool().clone();

        // ── Repositories ─────────────────────────────────────
        let user_repo = Arc::new(UserRepository::new(pool.clone()));
        let phrase_repo = Arc::new(PhraseRepository::new(pool.clone()));
        let request_repo = Arc::new(AccessRequestRepository::new(pool.clone()));
        let qr_code_repo = Arc::new(QrCodeRepository::new(pool.clone()));
        let settings_repo = Arc::new(SettingsRepository::new(pool));

        // ── Auth ─────────────────────────────────────────────
        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
        let password_hasher = Arc::new(PasswordHasher::new());

        // ── Services ─────────────────────────────────────────
        let notifier = Arc::new(NotificationService::new(mailer, &config.email));
        let share_links = Arc::new(ShareLinkManager::new(
            share_store,
            Arc::clone(&clock),
            &config.share,
        ));
        let public_pages = Arc::new(PublicPageService::new(
            Arc::clone(&share_links),
            Arc::clone(&qr_code_repo),
            Arc::clone(&settings_repo),
            Arc::clone(&user_repo),
        ));
        let accounts = Arc::new(AccountService::new(
            Arc::clone(&user_repo),
            Arc::clone(&phrase_repo),
            password_hasher,
            PasswordPolicy::new(&config.auth),
            jwt_encoder,
            Arc::clone(&clock),
        ));
        let qr_codes = Arc::new(QrCodeService::new(
            qr_code_repo,
            Arc::clone(&blobs),
            Arc::clone(&clock),
            &config.storage,
        ));
        let settings = Arc::new(SettingsService::new(
            settings_repo,
            Arc::clone(&blobs),
            Arc::clone(&clock),
            &config.storage,
        ));
        let admin = Arc::new(AdminService::new(
            Arc::clone(&user_repo),
            phrase_repo,
            Arc::clone(&request_repo),
            Arc::clone(&notifier),
            clock,
            &config.auth,
        ));
        let access_requests = Arc::new(AccessRequestService::new(
            Arc::clone(&user_repo),
            request_repo,
            notifier,
        ));

        Self {
            config: Arc::new(config),
            db,
            blobs,
            jwt_decoder,
            user_repo,
            accounts,
            share_links,
            public_pages,
            qr_codes,
            settings,
            admin,
            access_requests,
        }
    }
}
