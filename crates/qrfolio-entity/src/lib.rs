//! # qrfolio-entity
//!
//! Domain entity models. Every struct in this crate represents a database
//! table row or a domain value object. Database rows derive
//! `sqlx::FromRow`; all entities serialize with camelCase field names.

pub mod invite;
pub mod qr_code;
pub mod settings;
pub mod share;
pub mod user;
