//! Core data types for the storyreel pipeline.
//!
//! This crate defines the vocabulary shared by every stage of the pipeline:
//! story records and identifiers, blob locations, shots, asynchronous job
//! handles and their status state machine, and the execution record the
//! orchestrator accumulates across stages.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod execution;
mod job;
mod location;
mod shot;
mod story;

pub use execution::{
    ExecutionRecord, PipelineStatus, StageOutput, STAGE_FINAL_VIDEO, STAGE_INITIAL_VIDEO,
};
pub use job::{JobHandle, JobStatus};
pub use location::BlobLocation;
pub use shot::Shot;
pub use story::{scene_key, ImageResolution, StoryId, StoryMetadata, StoryRecord, SCENE_COUNT};
