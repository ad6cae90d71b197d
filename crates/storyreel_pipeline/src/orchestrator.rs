//! The pipeline orchestrator: sequences stages and accumulates the
//! execution record.

use crate::{MergeStage, PipelineConfig, StoryStage, VideoStage};
use chrono::Utc;
use std::sync::Arc;
use storyreel_core::{
    ExecutionRecord, JobStatus, PipelineStatus, StageOutput, STAGE_FINAL_VIDEO,
    STAGE_INITIAL_VIDEO,
};
use storyreel_error::StoryreelResult;
use storyreel_interface::{
    ImageGenerator, NarrationMergeJob, SilentVideoJob, SpeechSynthesizer, TextGenerator,
};
use storyreel_storage::BlobStore;

/// Sequences the pipeline stages for one execution.
///
/// Story generation, then silent video, then the narrated merge. The merge
/// stage runs only when narration is enabled, and a failed or timed-out
/// stage ends the run early. Stages hand each other nothing but the story
/// identifier (plus, for merge, the video stage's output location): no
/// stage re-derives data a prior stage already committed to storage.
pub struct Pipeline {
    story: StoryStage,
    video: VideoStage,
    merge: MergeStage,
    config: PipelineConfig,
}

impl Pipeline {
    /// Wire a pipeline from its capabilities and configuration.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        text: Arc<dyn TextGenerator>,
        images: Arc<dyn ImageGenerator>,
        speech: Arc<dyn SpeechSynthesizer>,
        video_client: Arc<dyn SilentVideoJob>,
        merge_client: Arc<dyn NarrationMergeJob>,
        store: Arc<dyn BlobStore>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            story: StoryStage::new(text, images, Arc::clone(&store), config.clone()),
            video: VideoStage::new(video_client, Arc::clone(&store), config.clone()),
            merge: MergeStage::new(merge_client, speech, store, config.clone()),
            config,
        }
    }

    /// Run a full execution for a topic.
    ///
    /// Stage outcomes accumulate in the returned record's `outputs` map; a
    /// blocking stage failure is recorded and halts the run, and nothing is
    /// attempted after it. `TimedOut` halts too but is reported as its own
    /// terminal state: the job is unresolved, not failed.
    ///
    /// # Errors
    ///
    /// Propagates only execution-level failures (bad topic, storage loss
    /// while committing the story); everything after story commit is
    /// reported through the record.
    #[tracing::instrument(skip(self), fields(execution_id = %execution_id, topic = %topic))]
    pub async fn run(
        &self,
        execution_id: uuid::Uuid,
        topic: &str,
    ) -> StoryreelResult<ExecutionRecord> {
        let story = self.story.generate(topic).await?;

        let mut record = ExecutionRecord::new(
            execution_id,
            story.story_id.clone(),
            self.config.buckets().source().clone(),
            self.config.buckets().destination().clone(),
        );

        // Silent video
        let outcome = match self.video.start_and_monitor(&story.story_id).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(error = %e, "Video stage failed before monitoring");
                record_outcome(&mut record, STAGE_INITIAL_VIDEO, JobStatus::Error, None);
                record.finish(PipelineStatus::Error, format!("Video stage failed: {}", e));
                return Ok(record);
            }
        };
        record_outcome(
            &mut record,
            STAGE_INITIAL_VIDEO,
            outcome.status,
            outcome.location.as_ref().map(|l| l.uri()),
        );
        if outcome.status != JobStatus::Completed {
            halt(&mut record, "Silent video rendering", outcome.status);
            return Ok(record);
        }
        let Some(silent_video) = outcome.location else {
            record.finish(
                PipelineStatus::Error,
                "Silent video completed without an output location".to_string(),
            );
            return Ok(record);
        };

        if !self.config.narrate() {
            record.finish(
                PipelineStatus::Completed,
                "Video generation completed successfully".to_string(),
            );
            return Ok(record);
        }

        // Narrated merge
        let outcome = match self
            .merge
            .merge(&story.story_id, &story.narration, &silent_video)
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(error = %e, "Merge stage failed before monitoring");
                record_outcome(&mut record, STAGE_FINAL_VIDEO, JobStatus::Error, None);
                record.finish(PipelineStatus::Error, format!("Merge stage failed: {}", e));
                return Ok(record);
            }
        };
        record_outcome(
            &mut record,
            STAGE_FINAL_VIDEO,
            outcome.status,
            outcome.location.as_ref().map(|l| l.uri()),
        );
        if outcome.status != JobStatus::Completed {
            halt(&mut record, "Narration merge", outcome.status);
            return Ok(record);
        }

        record.finish(
            PipelineStatus::Completed,
            "Narrated video generation completed successfully".to_string(),
        );
        Ok(record)
    }

    /// The pipeline's configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }
}

/// Merge a stage outcome into the record's outputs map.
fn record_outcome(
    record: &mut ExecutionRecord,
    stage: &str,
    status: JobStatus,
    location: Option<String>,
) {
    tracing::info!(stage, status = %status, location = ?location, "Recording stage outcome");
    record.record_stage(
        stage,
        StageOutput {
            status,
            location,
            timestamp: Utc::now(),
        },
    );
}

/// Finish the record for a non-completed stage status.
fn halt(record: &mut ExecutionRecord, stage: &str, status: JobStatus) {
    let (overall, message) = match status {
        JobStatus::TimedOut => (
            PipelineStatus::TimedOut,
            format!("{} unresolved within the monitoring budget", stage),
        ),
        JobStatus::Failed => (PipelineStatus::Failed, format!("{} failed", stage)),
        _ => (PipelineStatus::Error, format!("{} errored", stage)),
    };
    tracing::warn!(stage, status = %status, "Halting pipeline");
    record.finish(overall, message);
}
