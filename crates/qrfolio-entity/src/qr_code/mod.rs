//! QR code entity.

pub mod model;

pub use model::{CreateQrCode, QrCode, UpdateQrCode};
