//! Filesystem-backed blob storage.
//!
//! Maps each bucket to a subdirectory of the base path and each key to a
//! relative path within it, mirroring the object-store layout on local disk.

use crate::{BlobStore, ContentKind};
use async_trait::async_trait;
use std::path::PathBuf;
use storyreel_core::BlobLocation;
use storyreel_error::{StorageError, StorageErrorKind, StoryreelResult};

/// Filesystem storage backend.
///
/// Stores blobs at `{base_path}/{bucket}/{key}`.
///
/// # Features
///
/// - **Atomic writes**: temp file + rename, so a reader never observes a
///   partially written artifact
/// - **Lazy directories**: parent directories are created per write
pub struct FileSystemBlobStore {
    base_path: PathBuf,
}

impl FileSystemBlobStore {
    /// Create a new filesystem storage backend.
    ///
    /// Creates the base directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or accessed.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> StoryreelResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        tracing::info!(path = %base_path.display(), "Created filesystem blob store");
        Ok(Self { base_path })
    }

    /// Resolve a location to a path under the base directory.
    ///
    /// Rejects keys that would escape the bucket directory.
    fn resolve(&self, location: &BlobLocation) -> StoryreelResult<PathBuf> {
        if location.bucket.is_empty() || location.key.is_empty() {
            return Err(StorageError::new(StorageErrorKind::InvalidLocation(format!(
                "empty bucket or key in '{}'",
                location
            )))
            .into());
        }
        let escapes = location
            .key
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..");
        if escapes || location.bucket.contains('/') {
            return Err(StorageError::new(StorageErrorKind::InvalidLocation(format!(
                "path traversal in '{}'",
                location
            )))
            .into());
        }
        Ok(self.base_path.join(&location.bucket).join(&location.key))
    }
}

#[async_trait]
impl BlobStore for FileSystemBlobStore {
    #[tracing::instrument(skip(self, data), fields(location = %location, size = data.len(), kind = %kind))]
    async fn put(
        &self,
        location: &BlobLocation,
        data: &[u8],
        kind: ContentKind,
    ) -> StoryreelResult<()> {
        let path = self.resolve(location)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        // Write to a temp file first, then rename for atomicity
        let temp_path = path.with_extension("tmp");
        tokio::fs::write(&temp_path, data).await.map_err(|e| {
            StorageError::new(StorageErrorKind::BlobWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::BlobWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;

        tracing::info!(
            location = %location,
            size = data.len(),
            "Stored blob"
        );

        Ok(())
    }

    #[tracing::instrument(skip(self), fields(location = %location))]
    async fn get(&self, location: &BlobLocation) -> StoryreelResult<Vec<u8>> {
        let path = self.resolve(location)?;

        let data = tokio::fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::new(StorageErrorKind::NotFound(location.uri()))
            } else {
                StorageError::new(StorageErrorKind::BlobRead(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            }
        })?;

        tracing::debug!(location = %location, size = data.len(), "Retrieved blob");
        Ok(data)
    }

    #[tracing::instrument(skip(self), fields(location = %location))]
    async fn exists(&self, location: &BlobLocation) -> StoryreelResult<bool> {
        let path = self.resolve(location)?;
        Ok(tokio::fs::try_exists(&path).await.unwrap_or(false))
    }
}
