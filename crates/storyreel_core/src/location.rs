//! Blob store locations.

use serde::{Deserialize, Serialize};
use storyreel_error::{StorageError, StorageErrorKind, StoryreelResult};

/// An addressable location in the blob store: a bucket plus a key.
///
/// Rendered and parsed as an `s3://bucket/key` URI, which is how locations
/// travel through job requests and execution records.
///
/// # Examples
///
/// ```
/// use storyreel_core::BlobLocation;
///
/// let location = BlobLocation::new("story-images", "20250101_beach_ab12cd/scenes.json");
/// assert_eq!(
///     location.uri(),
///     "s3://story-images/20250101_beach_ab12cd/scenes.json"
/// );
///
/// let parsed: BlobLocation = location.uri().parse().unwrap();
/// assert_eq!(parsed, location);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlobLocation {
    /// Bucket (namespace) the blob lives in
    pub bucket: String,
    /// Key within the bucket; may contain `/` separators
    pub key: String,
}

impl BlobLocation {
    /// Create a location from a bucket and key.
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Render as an `s3://bucket/key` URI.
    pub fn uri(&self) -> String {
        format!("s3://{}/{}", self.bucket, self.key)
    }

    /// A new location under this one, treating the current key as a folder.
    pub fn join(&self, segment: &str) -> Self {
        let key = if self.key.is_empty() {
            segment.to_string()
        } else {
            format!("{}/{}", self.key.trim_end_matches('/'), segment)
        };
        Self::new(self.bucket.clone(), key)
    }
}

impl std::fmt::Display for BlobLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.uri())
    }
}

impl std::str::FromStr for BlobLocation {
    type Err = storyreel_error::StoryreelError;

    fn from_str(s: &str) -> StoryreelResult<Self> {
        let rest = s.strip_prefix("s3://").ok_or_else(|| {
            StorageError::new(StorageErrorKind::InvalidLocation(format!(
                "expected s3:// URI, got '{}'",
                s
            )))
        })?;
        let (bucket, key) = rest.split_once('/').ok_or_else(|| {
            StorageError::new(StorageErrorKind::InvalidLocation(format!(
                "URI '{}' has no key component",
                s
            )))
        })?;
        if bucket.is_empty() || key.is_empty() {
            return Err(StorageError::new(StorageErrorKind::InvalidLocation(format!(
                "URI '{}' has an empty bucket or key",
                s
            )))
            .into());
        }
        Ok(Self::new(bucket, key))
    }
}
