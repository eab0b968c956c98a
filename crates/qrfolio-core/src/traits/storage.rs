//! Blob storage trait for uploaded images.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use crate::result::AppResult;

/// A boxed stream of byte chunks used for serving stored blobs.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Stores uploaded images and hands back publicly reachable URLs.
///
/// Keys are relative, slash-separated paths such as
/// `qr-codes/{user_id}/{file}.png`.
#[async_trait]
pub trait BlobStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local").
    fn provider_type(&self) -> &str;

    /// Store `data` under `key`, returning the public URL.
    async fn put(&self, key: &str, data: Bytes) -> AppResult<String>;

    /// Read the blob stored under `key`.
    async fn get(&self, key: &str) -> AppResult<Bytes>;

    /// Open the blob stored under `key` as a chunked stream, with its size.
    async fn read_stream(&self, key: &str) -> AppResult<(ByteStream, u64)>;

    /// Key a previously returned URL points at, or `None` when the URL does
    /// not belong to this store.
    fn key_for_url(&self, url: &str) -> Option<String>;

    /// Delete the blob a previously returned URL points at.
    ///
    /// URLs that do not belong to this store are ignored.
    async fn delete_url(&self, url: &str) -> AppResult<()>;

    /// Check whether the backing storage is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
