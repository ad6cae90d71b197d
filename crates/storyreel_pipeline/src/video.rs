//! The video stage: renders a committed story into a silent multi-shot video.

use crate::{clean_scene_text, JobMonitor, PipelineConfig, StageOutcome};
use std::collections::BTreeMap;
use std::sync::Arc;
use storyreel_core::{Shot, StoryId};
use storyreel_error::{ConfigError, JsonError, StoryreelResult};
use storyreel_interface::{SilentVideoJob, VideoJobRequest, VideoSettings};
use storyreel_storage::{layout, BlobStore};

/// Renders a story's scenes into a silent video via an asynchronous
/// external job, monitored to completion.
///
/// The stage receives only the story identifier; everything else is read
/// back from the blob store, which is what lets it be retried independently.
pub struct VideoStage {
    client: Arc<dyn SilentVideoJob>,
    store: Arc<dyn BlobStore>,
    monitor: JobMonitor,
    config: PipelineConfig,
}

impl VideoStage {
    /// Create a video stage over the given capabilities.
    pub fn new(
        client: Arc<dyn SilentVideoJob>,
        store: Arc<dyn BlobStore>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            client,
            store,
            monitor: JobMonitor::from_config(config.monitor()),
            config,
        }
    }

    /// Submit a rendering job for the story and monitor it to completion.
    ///
    /// On [`Completed`](storyreel_core::JobStatus::Completed), the outcome
    /// carries `{destination}/{job_id}/output.mp4`; the folder is derived
    /// from the job handle once at submission time.
    ///
    /// # Errors
    ///
    /// - [`ConfigError`] if the scenes file yields zero usable shots:
    ///   nothing to render, fatal, not recoverable
    /// - storage/JSON errors if scenes.json cannot be read or parsed
    /// - generation errors if the job submission itself fails
    #[tracing::instrument(skip(self), fields(story_id = %story_id))]
    pub async fn start_and_monitor(&self, story_id: &StoryId) -> StoryreelResult<StageOutcome> {
        let shots = self.load_shots(story_id).await?;
        tracing::info!(shots = shots.len(), "Submitting silent-video job");

        let destination = self.config.buckets().destination();
        let request = VideoJobRequest {
            shots,
            settings: VideoSettings {
                fps: *self.config.video().fps(),
                dimension: self.config.video().dimension().clone(),
                seed: *self.config.video().seed(),
            },
            destination_bucket: destination.clone(),
        };

        let handle = self.client.submit(&request).await?;
        let folder = layout::job_output_folder(destination, handle.job_id());
        let output = layout::job_output_video(&folder);
        tracing::info!(handle = %handle, output = %output, "Job submitted");

        Ok(self
            .monitor
            .monitor(self.client.as_ref(), &handle, &output)
            .await)
    }

    /// Load scenes.json and build the ordered shot list.
    ///
    /// Shot order comes from the numeric key suffix, not map insertion
    /// order, guarding against out-of-order storage. Scene images are
    /// attached only when they exist; absence is expected.
    async fn load_shots(&self, story_id: &StoryId) -> StoryreelResult<Vec<Shot>> {
        let source = self.config.buckets().source();
        let location = layout::scenes_json(source, story_id);
        let raw = self.store.get(&location).await?;

        let manifest: BTreeMap<String, String> = serde_json::from_slice(&raw)
            .map_err(|e| JsonError::new(format!("Failed to parse {}: {}", location, e)))?;

        let mut numbered: Vec<(usize, String)> = manifest
            .iter()
            .filter_map(|(key, text)| {
                let shot = key
                    .strip_prefix("shot")?
                    .strip_suffix("_text")?
                    .parse::<usize>()
                    .ok()?;
                let text = clean_scene_text(text);
                (!text.is_empty()).then_some((shot, text))
            })
            .collect();
        numbered.sort_by_key(|(shot, _)| *shot);

        let mut shots = Vec::with_capacity(numbered.len());
        for (shot_number, text) in numbered {
            let image = layout::scene_image(source, story_id, shot_number);
            let shot = if self.store.exists(&image).await.unwrap_or(false) {
                tracing::debug!(shot = shot_number, image = %image, "Attaching scene image");
                Shot::with_image(text, image)
            } else {
                tracing::debug!(shot = shot_number, "No scene image, text-only shot");
                Shot::text_only(text)
            };
            shots.push(shot);
        }

        if shots.is_empty() {
            return Err(ConfigError::new(format!("no usable shots in {}", location)).into());
        }

        Ok(shots)
    }
}
