//! Storyreel turns a short text topic into a narrated video.
//!
//! Storyreel turns a short text topic into a narrated video through a
//! three-stage generation pipeline: a five-scene story (with optional
//! per-scene images), a silent multi-shot video rendered by an asynchronous
//! external job, and a narrated merge of the two. The generative backends
//! are injected capability traits; the pipeline owns the orchestration,
//! the bounded job monitoring, and the single execution record a client
//! polls.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use storyreel::{
//!     ExecutionService, FileSystemBlobStore, Pipeline, PipelineConfig,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     storyreel::init_observability()?;
//!
//!     let config = PipelineConfig::from_file("storyreel.toml")?;
//!     let store = Arc::new(FileSystemBlobStore::new("/var/storyreel")?);
//!     let pipeline = Pipeline::new(text, images, speech, video, merge, store, config);
//!     let service = ExecutionService::new(pipeline);
//!
//!     let started = service.start("A day at the beach").await?;
//!     let status = service.status(started.execution_id).await?;
//!     println!("{}", serde_json::to_string_pretty(&status)?);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Storyreel is organized as a workspace with focused crates:
//!
//! - `storyreel_core` - Core data types (stories, shots, job status, records)
//! - `storyreel_interface` - Generative capability traits
//! - `storyreel_error` - Error types
//! - `storyreel_storage` - Path-addressed blob storage and layout
//! - `storyreel_pipeline` - Stages, orchestrator, monitor, and service
//!
//! This crate (`storyreel`) re-exports everything for convenience.

#![forbid(unsafe_code)]

pub use storyreel_core::*;
pub use storyreel_error::*;
pub use storyreel_interface::*;
pub use storyreel_pipeline::*;
pub use storyreel_storage::*;

mod observability;

pub use observability::{init_observability, init_observability_with_config, ObservabilityConfig};
