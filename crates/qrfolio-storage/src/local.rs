//! Local filesystem blob store.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::StreamExt;
use tokio::fs;
use tokio_util::io::ReaderStream;
use tracing::{debug, warn};

use qrfolio_core::config::StorageConfig;
use qrfolio_core::error::{AppError, ErrorKind};
use qrfolio_core::result::AppResult;
use qrfolio_core::traits::{BlobStore, ByteStream};

/// Stores blobs under a root directory and serves them below a URL prefix.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    /// Root directory for all stored blobs.
    root: PathBuf,
    /// URL prefix the API serves the root under, e.g. `/uploads`.
    public_prefix: String,
}

impl LocalBlobStore {
    /// Create the store, creating the root directory if needed.
    pub async fn new(config: &StorageConfig) -> AppResult<Self> {
        let root = PathBuf::from(&config.upload_root);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create upload root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self {
            root,
            public_prefix: config.public_prefix.trim_end_matches('/').to_string(),
        })
    }

    /// Map a key onto a path inside the root, refusing anything that could
    /// escape it.
    fn resolve(&self, key: &str) -> AppResult<PathBuf> {
        let relative = Path::new(key);
        let safe = !key.is_empty()
            && !key.contains('\\')
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !safe {
            return Err(AppError::validation(format!("Invalid storage key: {key}")));
        }
        Ok(self.root.join(relative))
    }

    /// Public URL for a key.
    pub fn url_for(&self, key: &str) -> String {
        format!("{}/{}", self.public_prefix, key)
    }

    /// Extract the key from a URL this store produced.
    pub fn key_from_url<'a>(&self, url: &'a str) -> Option<&'a str> {
        url.strip_prefix(&self.public_prefix)?
            .strip_prefix('/')
            .filter(|key| !key.is_empty())
    }
}

fn not_found_or_storage(e: std::io::Error, key: &str, action: &str) -> AppError {
    if e.kind() == std::io::ErrorKind::NotFound {
        AppError::not_found(format!("Blob not found: {key}"))
    } else {
        AppError::with_source(ErrorKind::Storage, format!("Failed to {action} blob: {key}"), e)
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    fn provider_type(&self) -> &str {
        "local"
    }

    fn key_for_url(&self, url: &str) -> Option<String> {
        self.key_from_url(url).map(str::to_string)
    }

    async fn put(&self, key: &str, data: Bytes) -> AppResult<String> {
        let path = self.resolve(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        fs::write(&path, &data)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Storage, format!("Failed to write blob: {key}"), e))?;

        debug!(key, bytes = data.len(), "Stored blob");
        Ok(self.url_for(key))
    }

    async fn get(&self, key: &str) -> AppResult<Bytes> {
        let path = self.resolve(key)?;
        let data = fs::read(&path)
            .await
            .map_err(|e| not_found_or_storage(e, key, "read"))?;
        Ok(Bytes::from(data))
    }

    async fn read_stream(&self, key: &str) -> AppResult<(ByteStream, u64)> {
        let path = self.resolve(key)?;
        let file = fs::File::open(&path)
            .await
            .map_err(|e| not_found_or_storage(e, key, "open"))?;
        let meta = file
            .metadata()
            .await
            .map_err(|e| not_found_or_storage(e, key, "stat"))?;
        if !meta.is_file() {
            return Err(AppError::not_found(format!("Blob not found: {key}")));
        }

        let stream = ReaderStream::new(file);
        Ok((Box::pin(stream.map(|chunk| chunk.map(Bytes::from))), meta.len()))
    }

    async fn delete_url(&self, url: &str) -> AppResult<()> {
        let Some(key) = self.key_from_url(url) else {
            warn!(url, "Ignoring delete for URL outside the upload prefix");
            return Ok(());
        };
        let path = self.resolve(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(key, "Deleted blob");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to delete blob: {key}"),
                e,
            )),
        }
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(fs::metadata(&self.root)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false))
    }
}

/// Guess an image MIME type from a key's extension.
pub fn mime_from_path(path: &str) -> Option<&'static str> {
    let (_, ext) = path.rsplit_once('.')?;
    let mime = match ext.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",
        "tif" | "tiff" => "image/tiff",
        "avif" => "image/avif",
        _ => return None,
    };
    Some(mime)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store(dir: &tempfile::TempDir) -> LocalBlobStore {
        let config = StorageConfig {
            upload_root: dir.path().to_string_lossy().into_owned(),
            public_prefix: "/uploads/".to_string(),
            ..StorageConfig::default()
        };
        LocalBlobStore::new(&config).await.unwrap()
    }

    #[tokio::test]
    async fn test_put_get_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;

        let url = store
            .put("qr-codes/u1/a.png", Bytes::from_static(b"png"))
            .await
            .unwrap();
        assert_eq!(url, "/uploads/qr-codes/u1/a.png");
        assert_eq!(store.get("qr-codes/u1/a.png").await.unwrap(), Bytes::from_static(b"png"));

        store.delete_url(&url).await.unwrap();
        let err = store.get("qr-codes/u1/a.png").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        // Deleting twice is a no-op.
        store.delete_url(&url).await.unwrap();
    }

    #[tokio::test]
    async fn test_read_stream() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;
        store
            .put("logos/u1/logo.gif", Bytes::from_static(b"GIF89a"))
            .await
            .unwrap();

        let (mut stream, len) = store.read_stream("logos/u1/logo.gif").await.unwrap();
        assert_eq!(len, 6);
        let mut collected = Vec::new();
        while let Some(chunk) = stream.next().await {
            collected.extend_from_slice(&chunk.unwrap());
        }
        assert_eq!(collected, b"GIF89a");
    }

    #[tokio::test]
    async fn test_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;

        for key in ["../escape.png", "a/../../b.png", "/etc/passwd", "", "a\\..\\b"] {
            let err = store.put(key, Bytes::from_static(b"x")).await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation, "key {key:?}");
        }
    }

    #[tokio::test]
    async fn test_foreign_url_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;
        store
            .delete_url("https://cdn.example.com/x.png")
            .await
            .unwrap();
        assert!(store.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_key_for_url() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;
        let url = store.url_for("qr-codes/u/1.png");
        assert_eq!(store.key_for_url(&url).as_deref(), Some("qr-codes/u/1.png"));
        assert_eq!(store.key_for_url("https://cdn.example.com/x.png"), None);
        assert_eq!(store.key_for_url("/uploads/"), None);
    }

    #[test]
    fn test_mime_from_path() {
        assert_eq!(mime_from_path("a/b.PNG"), Some("image/png"));
        assert_eq!(mime_from_path("a/b.jpeg"), Some("image/jpeg"));
        assert_eq!(mime_from_path("a/b.exe"), None);
        assert_eq!(mime_from_path("noext"), None);
    }
}
