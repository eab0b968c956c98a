//! Custom Axum extractors.

pub mod auth;
pub mod client;

pub use auth::{AdminUser, AuthUser};
pub use client::ClientInfo;
