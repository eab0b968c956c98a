//! Public page settings.

pub mod service;

pub use service::{SettingsService, is_hex_color};
