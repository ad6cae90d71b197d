//! In-memory blob storage for tests and examples.

use crate::{BlobStore, ContentKind};
use async_trait::async_trait;
use std::collections::HashMap;
use storyreel_core::BlobLocation;
use storyreel_error::{StorageError, StorageErrorKind, StoryreelResult};
use tokio::sync::RwLock;

/// In-memory storage backend keyed by location URI.
///
/// A drop-in stand-in for [`FileSystemBlobStore`](crate::FileSystemBlobStore)
/// in tests: same contract, no disk.
#[derive(Default)]
pub struct MemoryBlobStore {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored blobs.
    pub async fn len(&self) -> usize {
        self.blobs.read().await.len()
    }

    /// Whether the store holds no blobs.
    pub async fn is_empty(&self) -> bool {
        self.blobs.read().await.is_empty()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(
        &self,
        location: &BlobLocation,
        data: &[u8],
        _kind: ContentKind,
    ) -> StoryreelResult<()> {
        self.blobs
            .write()
            .await
            .insert(location.uri(), data.to_vec());
        tracing::debug!(location = %location, size = data.len(), "Stored blob in memory");
        Ok(())
    }

    async fn get(&self, location: &BlobLocation) -> StoryreelResult<Vec<u8>> {
        self.blobs
            .read()
            .await
            .get(&location.uri())
            .cloned()
            .ok_or_else(|| StorageError::new(StorageErrorKind::NotFound(location.uri())).into())
    }

    async fn exists(&self, location: &BlobLocation) -> StoryreelResult<bool> {
        Ok(self.blobs.read().await.contains_key(&location.uri()))
    }
}
