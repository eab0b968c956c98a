//! # qrfolio-core
//!
//! Core crate for the QR payment portfolio. Contains the configuration
//! schema, the collaborator traits (clock, blob store, mailer) and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other qrfolio crates.

pub mod config;
pub mod error;
pub mod html;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
