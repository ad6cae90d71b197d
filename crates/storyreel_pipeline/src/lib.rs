//! Pipeline orchestration for storyreel.
//!
//! This crate turns a short text topic into a narrated video through three
//! sequential stages, each handing the next nothing but identifiers:
//!
//! 1. [`StoryStage`] generates a five-scene story for the topic and persists
//!    it to the blob store, with optional per-scene images.
//! 2. [`VideoStage`] renders the story into a silent multi-shot video via an
//!    asynchronous external job, monitored to completion.
//! 3. [`MergeStage`] synthesizes narration and merges it onto the silent
//!    video, again via an asynchronous external job.
//!
//! The [`Pipeline`] sequences the stages and accumulates a single
//! [`ExecutionRecord`](storyreel_core::ExecutionRecord) per run; the
//! [`ExecutionService`] exposes the start/status operations an external
//! caller sees; the [`JobMonitor`] is the shared bounded polling loop both
//! asynchronous stages rely on.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod extraction;
mod merge;
mod monitor;
mod orchestrator;
mod service;
mod status;
mod story;
mod video;

pub use config::{
    BucketConfig, ImageConfig, MonitorConfig, PipelineConfig, SpeechConfig, VideoConfig,
};
pub use extraction::{clean_scene_text, extract_characters, parse_scenes, CharacterMention};
pub use merge::MergeStage;
pub use monitor::{JobMonitor, StageOutcome};
pub use orchestrator::Pipeline;
pub use service::{ExecutionService, StartResponse};
pub use status::{project, ExecutionSlot, FailureDocument, RawExecutionState, RunningDocument, StatusDocument};
pub use story::StoryStage;
pub use video::VideoStage;
