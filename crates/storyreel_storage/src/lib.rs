//! Path-addressed blob storage for the storyreel pipeline.
//!
//! Every artifact a pipeline run produces lives at a fixed, story-scoped
//! location (see [`layout`]), so the store is a thin put/get/exists interface
//! keyed by [`BlobLocation`] rather than a content-addressable system.
//!
//! # Example
//!
//! ```rust
//! use storyreel_core::BlobLocation;
//! use storyreel_storage::{BlobStore, ContentKind, MemoryBlobStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = MemoryBlobStore::new();
//! let location = BlobLocation::new("story-images", "20250101_beach_ab12cd/scenes.json");
//!
//! store.put(&location, b"{}", ContentKind::Json).await?;
//! assert!(store.exists(&location).await?);
//! assert_eq!(store.get(&location).await?, b"{}");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use async_trait::async_trait;
use storyreel_core::BlobLocation;
use storyreel_error::StoryreelResult;

mod filesystem;
pub mod layout;
mod memory;

pub use filesystem::FileSystemBlobStore;
pub use memory::MemoryBlobStore;
pub use storyreel_error::{StorageError, StorageErrorKind};

/// Trait for pluggable blob storage backends.
///
/// All coordination in the pipeline happens through immutable,
/// path-addressed artifacts, so this is deliberately minimal: no listing, no
/// deletion, no transactions. Writes must be durably committed before `put`
/// returns, because the next stage reads artifacts back by path.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store a blob at the given location, overwriting any existing blob.
    async fn put(
        &self,
        location: &BlobLocation,
        data: &[u8],
        kind: ContentKind,
    ) -> StoryreelResult<()>;

    /// Retrieve a blob.
    ///
    /// # Errors
    ///
    /// Returns [`StorageErrorKind::NotFound`] if nothing exists at the
    /// location.
    async fn get(&self, location: &BlobLocation) -> StoryreelResult<Vec<u8>>;

    /// Check whether a blob exists.
    async fn exists(&self, location: &BlobLocation) -> StoryreelResult<bool>;
}

/// Content type of a stored blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    /// JSON document (scenes, metadata)
    Json,
    /// PNG scene image
    Image,
    /// MP3 narration audio
    Audio,
    /// MP4 video
    Video,
}

impl ContentKind {
    /// The MIME type written alongside the blob where the backend supports it.
    pub fn mime(&self) -> &'static str {
        match self {
            ContentKind::Json => "application/json",
            ContentKind::Image => "image/png",
            ContentKind::Audio => "audio/mpeg",
            ContentKind::Video => "video/mp4",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.mime())
    }
}
