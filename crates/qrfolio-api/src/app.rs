//! Application builder: wires router, middleware and state into an Axum app.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use qrfolio_core::config::AppConfig;
use qrfolio_core::error::AppError;
use qrfolio_core::traits::{BlobStore, Mailer, SystemClock};
use qrfolio_database::{DatabasePool, ShareLinkRepository, migration::run_migrations};
use qrfolio_service::{LogMailer, ResendMailer};
use qrfolio_storage::LocalBlobStore;

use crate::middleware::build_cors_layer;
use crate::router::build_router;
use crate::state::{AppState, Collaborators};

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);
    let cors = build_cors_layer(&state.config.server.cors);

    build_router(state)
        .layer(TimeoutLayer::new(timeout))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Connects to the database, runs migrations and serves until Ctrl+C.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    info!("Starting qrfolio server...");

    // ── Step 1: Database ─────────────────────────────────────────
    let db = DatabasePool::connect(&config.database).await?;
    run_migrations(db.pool()).await?;

    // ── Step 2: Collaborators ────────────────────────────────────
    let blobs: Arc<dyn BlobStore> = Arc::new(LocalBlobStore::new(&config.storage).await?);
    let mailer: Arc<dyn Mailer> = match ResendMailer::from_config(&config.email) {
        Some(resend) => {
            info!(from = %config.email.from, "Email delivery via Resend");
            Arc::new(resend)
        }
        None => {
            warn!("No Resend API key configured; emails will only be logged");
            Arc::new(LogMailer)
        }
    };
    let collaborators = Collaborators {
        share_store: Arc::new(ShareLinkRepository::new(db.pool().clone())),
        blobs,
        mailer,
        clock: Arc::new(SystemClock),
    };

    // ── Step 3: Build and start HTTP server ──────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::assemble(config, db.clone(), collaborators);
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!("qrfolio server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    db.close().await;
    info!("qrfolio server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl+C; shutting down");
    }
}
