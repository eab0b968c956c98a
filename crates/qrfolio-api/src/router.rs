//! Route definitions for the qrfolio HTTP API.
//!
//! JSON routes are mounted under `/api`. The public share page and stored
//! images live at the root so share URLs stay short.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::compression::CompressionLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the router with every route and the request-scoped layers.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.server.body_limit_bytes;
    let uploads_path = format!(
        "{}/{{*path}}",
        state.config.storage.public_prefix.trim_end_matches('/')
    );

    let api_routes = Router::new()
        .merge(health_routes())
        .merge(auth_routes())
        .merge(share_link_routes())
        .merge(qr_code_routes())
        .merge(settings_routes())
        .merge(admin_routes());

    Router::new()
        .nest("/api", api_routes)
        .route("/share/{token}", get(handlers::share_page::open))
        .route(&uploads_path, get(handlers::uploads::serve))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(axum_middleware::from_fn(middleware::request_logging))
        .with_state(state)
}

/// Liveness and dependency status
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Registration, login, current user and public access requests
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::me))
        .route("/access-requests", post(handlers::access_requests::submit))
}

/// Owner share link management
fn share_link_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/share-links",
            get(handlers::share_links::list).post(handlers::share_links::create),
        )
        .route("/share-links/{id}", delete(handlers::share_links::revoke))
        .route("/share-links/{id}/logs", get(handlers::share_links::logs))
}

/// QR code CRUD, ordering and image upload
fn qr_code_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/qr-codes",
            get(handlers::qr_codes::list).post(handlers::qr_codes::create),
        )
        .route("/qr-codes/upload", post(handlers::qr_codes::upload))
        .route("/qr-codes/order", put(handlers::qr_codes::reorder))
        .route(
            "/qr-codes/{id}",
            put(handlers::qr_codes::update).delete(handlers::qr_codes::delete),
        )
}

/// Page appearance
fn settings_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/settings",
            get(handlers::settings::get).put(handlers::settings::update),
        )
        .route("/settings/logo", post(handlers::settings::upload_logo))
}

/// Admin-only endpoints
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/stats", get(handlers::admin::stats))
        .route("/admin/users", get(handlers::admin::list_users))
        .route(
            "/admin/phrases",
            get(handlers::admin::list_phrases).post(handlers::admin::generate_phrase),
        )
        .route("/admin/phrases/{id}", delete(handlers::admin::revoke_phrase))
        .route(
            "/admin/access-requests",
            get(handlers::admin::list_access_requests),
        )
        .route(
            "/admin/access-requests/{id}",
            put(handlers::admin::review_access_request),
        )
}
