//! # Stash Store
//!
//! Object storage adapter for the Stash gateway.
//!
//! This crate provides:
//! - **`ObjectStore` trait**: the narrow two-operation capability surface
//!   (get an object as a byte stream, put an object from a byte stream)
//! - **`S3ObjectStore`**: S3-compatible backend client (static credentials,
//!   custom endpoint, path-style addressing)
//! - **`MemoryObjectStore`**: in-process store for tests
//!
//! ## Example
//!
//! ```rust,ignore
//! use stash_store::{ObjectStore, PutBody, S3ObjectStore, StoreConfig};
//!
//! let store = S3ObjectStore::new(StoreConfig::from_parts(key, secret, region, endpoint)).await?;
//! store.put("my-key", PutBody::from_bytes(data), "text/plain").await?;
//! let download = store.get("my-key").await?;
//! ```

pub mod config;
pub mod error;
pub mod memory;
pub mod s3;

pub use config::StoreConfig;
pub use error::{Result, StoreError};
pub use memory::MemoryObjectStore;
pub use s3::S3ObjectStore;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;
use tempfile::NamedTempFile;

/// Streamed object content.
pub type BodyStream = Pin<Box<dyn Stream<Item = std::io::Result<Bytes>> + Send>>;

/// A downloaded object: its declared content type, total length, and a
/// stream of its bytes. The stream reads from the backend lazily; dropping
/// it aborts the transfer.
pub struct ObjectDownload {
    pub content_type: String,
    pub content_length: u64,
    pub body: BodyStream,
}

/// Upload payload handed to [`ObjectStore::put`].
///
/// Backends need a known content length up front, so the payload is either
/// fully in memory or spooled to a temp file of known size. The temp file
/// is removed when the `PutBody` is dropped.
pub enum PutBody {
    Bytes(Bytes),
    Spooled { file: NamedTempFile, len: u64 },
}

impl PutBody {
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        Self::Bytes(bytes.into())
    }

    /// Payload length in bytes.
    pub fn len(&self) -> u64 {
        match self {
            Self::Bytes(b) => b.len() as u64,
            Self::Spooled { len, .. } => *len,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for PutBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bytes(b) => f.debug_tuple("Bytes").field(&b.len()).finish(),
            Self::Spooled { len, .. } => f.debug_struct("Spooled").field("len", len).finish(),
        }
    }
}

/// Trait for object storage backends.
///
/// Implementations are immutable after construction and safe to share
/// across concurrent requests without locking.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Retrieve an object by key as a byte stream.
    ///
    /// The object is not loaded into memory; the returned stream reads
    /// from the backend as it is polled.
    async fn get(&self, key: &str) -> Result<ObjectDownload>;

    /// Store an object under `key` with the given content type.
    ///
    /// `content_type` must be non-empty; it is recorded verbatim and
    /// returned on every subsequent `get` of the same key.
    async fn put(&self, key: &str, body: PutBody, content_type: &str) -> Result<()>;
}

/// Shared argument checks for `get`/`put` implementations.
pub(crate) fn check_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(StoreError::EmptyKey);
    }
    Ok(())
}

pub(crate) fn check_content_type(content_type: &str) -> Result<()> {
    if content_type.is_empty() {
        return Err(StoreError::MissingContentType);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_body_len_in_memory() {
        let body = PutBody::from_bytes("hello-test");
        assert_eq!(body.len(), 10);
        assert!(!body.is_empty());
    }

    #[test]
    fn empty_key_is_rejected() {
        assert!(matches!(check_key(""), Err(StoreError::EmptyKey)));
        assert!(check_key("a").is_ok());
    }

    #[test]
    fn empty_content_type_is_rejected() {
        assert!(matches!(
            check_content_type(""),
            Err(StoreError::MissingContentType)
        ));
        assert!(check_content_type("text/plain").is_ok());
    }
}
