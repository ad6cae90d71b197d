//! Top-level error wrapper types.

use crate::{ConfigError, GenerationError, JsonError, StorageError, ValidationError};

/// The foundation error enum aggregating every storyreel error domain.
///
/// # Examples
///
/// ```
/// use storyreel_error::{StoryreelError, ValidationError};
///
/// let validation = ValidationError::new("topic is required");
/// let err: StoryreelError = validation.into();
/// assert!(format!("{}", err).contains("Validation"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum StoryreelErrorKind {
    /// Bad client input
    #[from(ValidationError)]
    Validation(ValidationError),
    /// Missing or malformed configuration/upstream artifact
    #[from(ConfigError)]
    Config(ConfigError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Blob storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Upstream generative service error
    #[from(GenerationError)]
    Generation(GenerationError),
}

/// Storyreel error with kind discrimination.
///
/// # Examples
///
/// ```
/// use storyreel_error::{ConfigError, StoryreelResult};
///
/// fn might_fail() -> StoryreelResult<()> {
///     Err(ConfigError::new("missing destination bucket"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Storyreel Error: {}", _0)]
pub struct StoryreelError(Box<StoryreelErrorKind>);

impl StoryreelError {
    /// Create a new error from a kind.
    pub fn new(kind: StoryreelErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StoryreelErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to StoryreelErrorKind
impl<T> From<T> for StoryreelError
where
    T: Into<StoryreelErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for storyreel operations.
///
/// # Examples
///
/// ```
/// use storyreel_error::{StoryreelResult, ValidationError};
///
/// fn parse_topic(raw: Option<&str>) -> StoryreelResult<String> {
///     match raw {
///         Some(topic) if !topic.trim().is_empty() => Ok(topic.to_string()),
///         _ => Err(ValidationError::new("topic is required"))?,
///     }
/// }
/// ```
pub type StoryreelResult<T> = std::result::Result<T, StoryreelError>;
