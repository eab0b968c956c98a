//! # qrfolio-storage
//!
//! Storage for uploaded QR and logo images: a local-filesystem
//! [`BlobStore`](qrfolio_core::traits::BlobStore) and the checks every
//! upload passes before it is stored.

pub mod local;
pub mod validate;

pub use local::{LocalBlobStore, mime_from_path};
pub use validate::{UploadedImage, validate_image};
