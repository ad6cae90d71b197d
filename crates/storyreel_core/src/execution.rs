//! Execution records: the orchestrator's externally-visible aggregate.

use crate::{JobStatus, StoryId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Stage name under which the silent-video output is recorded.
pub const STAGE_INITIAL_VIDEO: &str = "initial_video";

/// Stage name under which the narrated/merged output is recorded.
pub const STAGE_FINAL_VIDEO: &str = "final_video";

/// Overall status of a pipeline execution.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum PipelineStatus {
    /// Execution still running
    #[serde(rename = "IN_PROGRESS")]
    #[display("IN_PROGRESS")]
    InProgress,
    /// Every scheduled stage completed
    Completed,
    /// A stage reported failure; no later stage was attempted
    Failed,
    /// A stage's monitoring budget was exhausted; the job is unresolved,
    /// not failed
    TimedOut,
    /// A stage's polling failed, or the orchestrator hit an internal error
    Error,
}

/// The recorded outcome of one completed stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageOutput {
    /// Terminal status the stage reported
    pub status: JobStatus,
    /// Output location, present only when the stage completed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// When the stage finished
    pub timestamp: DateTime<Utc>,
}

/// The accumulated, client-queryable result of one pipeline run.
///
/// The `outputs` map is append-only: a later stage never erases an earlier
/// stage's recorded output, so a failing merge still leaves the silent-video
/// entry intact for the client.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use storyreel_core::{
///     ExecutionRecord, JobStatus, StageOutput, StoryId, STAGE_INITIAL_VIDEO,
/// };
/// use uuid::Uuid;
///
/// let mut record = ExecutionRecord::new(
///     Uuid::new_v4(),
///     StoryId::from("20250101_beach_ab12cd"),
///     "story-images",
///     "video-output",
/// );
/// record.record_stage(
///     STAGE_INITIAL_VIDEO,
///     StageOutput {
///         status: JobStatus::Completed,
///         location: Some("s3://video-output/job-1/output.mp4".to_string()),
///         timestamp: Utc::now(),
///     },
/// );
/// assert!(record.outputs.contains_key(STAGE_INITIAL_VIDEO));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionRecord {
    /// Execution identifier issued by the orchestration substrate
    pub execution_id: Uuid,
    /// Overall status
    pub status: PipelineStatus,
    /// Story this execution is rendering
    pub story_id: StoryId,
    /// Bucket holding story artifacts (scenes, metadata, images)
    pub source_bucket: String,
    /// Bucket receiving rendered video output
    pub destination_bucket: String,
    /// When the record was last updated
    pub timestamp: DateTime<Utc>,
    /// Human-readable outcome summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Per-stage outcomes, keyed by stage name
    pub outputs: BTreeMap<String, StageOutput>,
}

impl ExecutionRecord {
    /// Create a fresh in-progress record.
    pub fn new(
        execution_id: Uuid,
        story_id: StoryId,
        source_bucket: impl Into<String>,
        destination_bucket: impl Into<String>,
    ) -> Self {
        Self {
            execution_id,
            status: PipelineStatus::InProgress,
            story_id,
            source_bucket: source_bucket.into(),
            destination_bucket: destination_bucket.into(),
            timestamp: Utc::now(),
            message: None,
            outputs: BTreeMap::new(),
        }
    }

    /// Record a stage outcome under its name.
    ///
    /// Append-only: an existing entry is left untouched, so retried or
    /// mis-sequenced callers cannot clobber committed results.
    pub fn record_stage(&mut self, stage: &str, output: StageOutput) {
        self.timestamp = output.timestamp;
        self.outputs.entry(stage.to_string()).or_insert(output);
    }

    /// Mark the record terminal with an outcome summary.
    pub fn finish(&mut self, status: PipelineStatus, message: impl Into<String>) {
        self.status = status;
        self.message = Some(message.into());
        self.timestamp = Utc::now();
    }
}
