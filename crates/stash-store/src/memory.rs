//! In-memory object store for testing

use crate::{
    check_content_type, check_key, ObjectDownload, ObjectStore, PutBody, Result, StoreError,
};
use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use futures::stream;
use std::sync::Arc;

#[derive(Clone, Debug)]
struct StoredObject {
    data: Bytes,
    content_type: String,
}

/// An in-memory object store
#[derive(Clone, Default)]
pub struct MemoryObjectStore {
    objects: Arc<DashMap<String, StoredObject>>,
}

impl MemoryObjectStore {
    /// Create a new empty memory store
    pub fn new() -> Self {
        Self {
            objects: Arc::new(DashMap::new()),
        }
    }

    /// Number of stored objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Whether an object exists under `key`
    pub fn contains(&self, key: &str) -> bool {
        self.objects.contains_key(key)
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn get(&self, key: &str) -> Result<ObjectDownload> {
        check_key(key)?;

        let object = self
            .objects
            .get(key)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;

        let content_length = object.data.len() as u64;
        let body: crate::BodyStream = Box::pin(stream::iter([Ok(object.data)]));

        Ok(ObjectDownload {
            content_type: object.content_type,
            content_length,
            body,
        })
    }

    async fn put(&self, key: &str, body: PutBody, content_type: &str) -> Result<()> {
        check_key(key)?;
        check_content_type(content_type)?;

        let data = match body {
            PutBody::Bytes(bytes) => bytes,
            PutBody::Spooled { file, .. } => {
                Bytes::from(tokio::fs::read(file.path()).await?)
            }
        };

        self.objects.insert(
            key.to_string(),
            StoredObject {
                data,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }
}
