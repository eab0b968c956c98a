//! QR code management.

pub mod service;

pub use service::{NewQrCode, QrCodeService};
