//! # qrfolio-api
//!
//! HTTP layer for qrfolio built on Axum.
//!
//! Serves the JSON API under `/api`, the public share page at
//! `/share/{token}` and stored images under the storage prefix. Provides
//! the auth extractors, request logging and CORS middleware, DTOs, the
//! HTML renderer and the `AppError` to HTTP mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod render;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::{AppState, Collaborators};
