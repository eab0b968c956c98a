//! Uploaded image storage configuration.

use serde::{Deserialize, Serialize};

/// Local blob storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory that holds uploaded QR images and logos.
    #[serde(default = "default_upload_root")]
    pub upload_root: String,
    /// URL path prefix under which stored files are served.
    #[serde(default = "default_public_prefix")]
    pub public_prefix: String,
    /// Maximum QR image size in bytes (default 5 MB).
    #[serde(default = "default_max_qr_image")]
    pub max_qr_image_bytes: usize,
    /// Maximum logo size in bytes (default 2 MB).
    #[serde(default = "default_max_logo")]
    pub max_logo_bytes: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_root: default_upload_root(),
            public_prefix: default_public_prefix(),
            max_qr_image_bytes: default_max_qr_image(),
            max_logo_bytes: default_max_logo(),
        }
    }
}

fn default_upload_root() -> String {
    "./data/uploads".to_string()
}

fn default_public_prefix() -> String {
    "/uploads".to_string()
}

fn default_max_qr_image() -> usize {
    5 * 1024 * 1024
}

fn default_max_logo() -> usize {
    2 * 1024 * 1024
}
