//! The narration/merge stage: combines the silent video with synthesized narration.

use crate::{JobMonitor, PipelineConfig, StageOutcome};
use std::sync::Arc;
use storyreel_core::{BlobLocation, StoryId};
use storyreel_error::{ConfigError, StoryreelResult};
use storyreel_interface::{MergeJobRequest, NarrationMergeJob, SpeechRequest, SpeechSynthesizer};
use storyreel_storage::{layout, BlobStore, ContentKind};

/// Synthesizes narration audio and merges it onto the silent video via an
/// asynchronous external job.
pub struct MergeStage {
    client: Arc<dyn NarrationMergeJob>,
    speech: Arc<dyn SpeechSynthesizer>,
    store: Arc<dyn BlobStore>,
    monitor: JobMonitor,
    config: PipelineConfig,
}

impl MergeStage {
    /// Create a merge stage over the given capabilities.
    pub fn new(
        client: Arc<dyn NarrationMergeJob>,
        speech: Arc<dyn SpeechSynthesizer>,
        store: Arc<dyn BlobStore>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            client,
            speech,
            store,
            monitor: JobMonitor::from_config(config.monitor()),
            config,
        }
    }

    /// Synthesize narration and merge it onto the silent video.
    ///
    /// `silent_video` must be the exact location the video stage produced
    /// for this story: the merge job references it verbatim, never a
    /// guessed or default path, so concurrent executions cannot
    /// cross-contaminate.
    ///
    /// # Errors
    ///
    /// - speech synthesis and job submission failures
    /// - storage failures writing the narration audio
    /// - [`ConfigError`] if the silent-video input is missing from the store
    #[tracing::instrument(skip(self, narration), fields(story_id = %story_id, video = %silent_video))]
    pub async fn merge(
        &self,
        story_id: &StoryId,
        narration: &str,
        silent_video: &BlobLocation,
    ) -> StoryreelResult<StageOutcome> {
        let destination = self.config.buckets().destination();

        tracing::info!("Synthesizing narration audio");
        let request = SpeechRequest {
            text: narration.to_string(),
            voice: self.config.speech().voice().clone(),
            language: self.config.speech().language().clone(),
            sample_rate: *self.config.speech().sample_rate(),
        };
        let audio = self.speech.synthesize(&request).await?;

        let audio_location = layout::narration_audio(destination, story_id);
        self.store
            .put(&audio_location, &audio, ContentKind::Audio)
            .await?;
        tracing::info!(audio = %audio_location, size = audio.len(), "Stored narration audio");

        if !self.store.exists(silent_video).await.unwrap_or(false) {
            return Err(ConfigError::new(format!(
                "silent video input not found at {}",
                silent_video
            ))
            .into());
        }

        let output = layout::final_output(destination, story_id);
        let request = MergeJobRequest {
            video: silent_video.clone(),
            audio: audio_location,
            output: output.clone(),
        };

        let handle = self.client.submit(&request).await?;
        tracing::info!(handle = %handle, output = %output, "Merge job submitted");

        Ok(self
            .monitor
            .monitor(self.client.as_ref(), &handle, &output)
            .await)
    }
}
