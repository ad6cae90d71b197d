//! Error types for the storyreel pipeline.
//!
//! This crate provides the foundation error types used throughout the
//! storyreel workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern for clean error
//! handling:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use storyreel_error::{StoryreelResult, ValidationError};
//!
//! fn start_pipeline(topic: &str) -> StoryreelResult<()> {
//!     if topic.trim().is_empty() {
//!         Err(ValidationError::new("topic is required"))?
//!     }
//!     Ok(())
//! }
//!
//! assert!(start_pipeline("").is_err());
//! assert!(start_pipeline("A day at the beach").is_ok());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod generation;
mod json;
mod storage;
mod validation;

pub use config::ConfigError;
pub use error::{StoryreelError, StoryreelErrorKind, StoryreelResult};
pub use generation::{GenerationError, GenerationErrorKind};
pub use json::JsonError;
pub use storage::{StorageError, StorageErrorKind};
pub use validation::ValidationError;
