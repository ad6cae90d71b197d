//! The story stage: turns a topic into a persisted five-scene story.

use crate::{extract_characters, parse_scenes, PipelineConfig};
use chrono::Utc;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::Quota;
use std::num::NonZeroU32;
use std::sync::Arc;
use storyreel_core::{ImageResolution, StoryId, StoryMetadata, StoryRecord, SCENE_COUNT};
use storyreel_error::{
    ConfigError, GenerationError, GenerationErrorKind, StoryreelResult, ValidationError,
};
use storyreel_interface::{ImageGenerator, ImageRequest, TextGenerator, TextRequest};
use storyreel_storage::{layout, BlobStore, ContentKind};

type DirectRateLimiter = governor::RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Narration used when the model cannot produce one.
const FALLBACK_NARRATION: &str = "A story unfolds across five scenes.";

/// Generates a story for a topic and commits it to the blob store.
///
/// This stage trades accuracy for availability: any failure in text
/// generation or parsing degrades to a synthetic scene list derived from the
/// topic, and a failed scene image is skipped rather than aborting the run.
/// The pipeline always gets *something* to render. Only bad input
/// (`ValidationError`) and storage failures propagate.
pub struct StoryStage {
    text: Arc<dyn TextGenerator>,
    images: Arc<dyn ImageGenerator>,
    store: Arc<dyn BlobStore>,
    config: PipelineConfig,
    image_limiter: Option<Arc<DirectRateLimiter>>,
}

impl StoryStage {
    /// Create a story stage over the given capabilities.
    ///
    /// Image-call pacing comes from `images.per_minute` in the
    /// configuration; a single-cell burst keeps calls evenly spaced the way
    /// the upstream image service expects.
    pub fn new(
        text: Arc<dyn TextGenerator>,
        images: Arc<dyn ImageGenerator>,
        store: Arc<dyn BlobStore>,
        config: PipelineConfig,
    ) -> Self {
        let image_limiter = NonZeroU32::new(*config.images().per_minute()).map(|n| {
            let quota = Quota::per_minute(n).allow_burst(NonZeroU32::MIN);
            Arc::new(governor::RateLimiter::direct(quota))
        });

        Self {
            text,
            images,
            store,
            config,
            image_limiter,
        }
    }

    /// Generate a story for a topic.
    ///
    /// Persists `scenes.json` and `metadata.json` before attempting image
    /// generation, and again after, so partial progress is inspectable even
    /// when a later step fails.
    ///
    /// # Errors
    ///
    /// - [`ValidationError`] if the topic is empty
    /// - storage errors if the committed artifacts cannot be written
    #[tracing::instrument(skip(self), fields(topic = %topic, story_id = tracing::field::Empty))]
    pub async fn generate(&self, topic: &str) -> StoryreelResult<StoryRecord> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(ValidationError::new("topic is required").into());
        }

        let story_id = StoryId::generate(topic);
        tracing::Span::current().record("story_id", story_id.as_str());
        tracing::info!("Generating story");

        let (scenes, full_text) = match self.generate_scenes(topic).await {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Story generation failed, falling back to synthetic scenes"
                );
                fallback_story(topic)
            }
        };

        let narration = match self.generate_narration(&full_text).await {
            Ok(narration) => narration,
            Err(e) => {
                tracing::warn!(error = %e, "Narration generation failed, using stock narration");
                FALLBACK_NARRATION.to_string()
            }
        };

        let characters = extract_characters(&full_text);
        tracing::debug!(
            characters = characters.len(),
            "Extracted character mentions from full text"
        );

        let record = StoryRecord {
            story_id: story_id.clone(),
            topic: topic.to_string(),
            scenes,
            full_text,
            narration,
            created_at: Utc::now(),
        };

        let mut metadata = StoryMetadata {
            story_id,
            topic: topic.to_string(),
            creation_date: record.created_at,
            scene_count: record.scenes.len(),
            image_locations: Vec::new(),
            generated_images: 0,
            image_resolution: ImageResolution {
                width: *self.config.images().width(),
                height: *self.config.images().height(),
            },
        };
        self.persist(&record, &metadata).await?;

        let image_locations = self.generate_scene_images(&record).await;
        metadata.generated_images = image_locations.len();
        metadata.image_locations = image_locations;
        self.persist(&record, &metadata).await?;

        tracing::info!(
            scenes = record.scenes.len(),
            images = metadata.generated_images,
            "Story stage complete"
        );
        Ok(record)
    }

    /// Call the text model and parse its response into exactly
    /// [`SCENE_COUNT`] scenes.
    async fn generate_scenes(&self, topic: &str) -> StoryreelResult<(Vec<String>, String)> {
        let request = TextRequest::builder()
            .prompt(story_prompt(topic))
            .max_tokens(300u32)
            .temperature(0.7f32)
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build text request: {}", e)))?;

        let full_text = self.text.generate(&request).await?;
        if full_text.trim().is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::EmptyResponse).into());
        }

        let scenes = parse_scenes(&full_text, topic)?;
        Ok((scenes, full_text))
    }

    /// Distill a voice-over script from the full story text.
    async fn generate_narration(&self, full_text: &str) -> StoryreelResult<String> {
        let request = TextRequest::builder()
            .prompt(narration_prompt(full_text))
            .max_tokens(200u32)
            .temperature(0.7f32)
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build text request: {}", e)))?;

        let narration = self.text.generate(&request).await?;
        let narration = narration.trim();
        if narration.is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::EmptyResponse).into());
        }
        Ok(narration.to_string())
    }

    /// Generate and store one image per scene, skipping failures.
    ///
    /// Returns the locations of the images that were actually stored.
    async fn generate_scene_images(&self, record: &StoryRecord) -> Vec<String> {
        let mut locations = Vec::new();

        for (index, scene) in record.scenes.iter().enumerate() {
            let shot = index + 1;
            tracing::info!(shot, total = SCENE_COUNT, "Generating scene image");

            if let Some(limiter) = &self.image_limiter {
                limiter.until_ready().await;
            }

            let request = ImageRequest {
                prompt: format!("Scene {} of {}:\n{}", shot, SCENE_COUNT, scene),
                width: *self.config.images().width(),
                height: *self.config.images().height(),
                negative_prompt: Some(self.config.images().negative_prompt().clone()),
            };

            let image = match self.images.generate(&request).await {
                Ok(image) => image,
                Err(e) => {
                    tracing::warn!(shot, error = %e, "Image generation failed, skipping scene");
                    continue;
                }
            };

            let location = layout::scene_image(
                self.config.buckets().source(),
                &record.story_id,
                shot,
            );
            match self.store.put(&location, &image, ContentKind::Image).await {
                Ok(()) => locations.push(location.uri()),
                Err(e) => {
                    tracing::warn!(shot, error = %e, "Failed to store scene image, skipping");
                }
            }
        }

        locations
    }

    /// Write scenes.json and metadata.json for the record.
    async fn persist(&self, record: &StoryRecord, metadata: &StoryMetadata) -> StoryreelResult<()> {
        let source = self.config.buckets().source();

        let scenes = serde_json::to_vec_pretty(&record.scene_manifest()).map_err(|e| {
            storyreel_error::JsonError::new(format!("Failed to serialize scenes: {}", e))
        })?;
        self.store
            .put(
                &layout::scenes_json(source, &record.story_id),
                &scenes,
                ContentKind::Json,
            )
            .await?;

        let metadata = serde_json::to_vec_pretty(metadata).map_err(|e| {
            storyreel_error::JsonError::new(format!("Failed to serialize metadata: {}", e))
        })?;
        self.store
            .put(
                &layout::metadata_json(source, &record.story_id),
                &metadata,
                ContentKind::Json,
            )
            .await?;

        Ok(())
    }
}

/// The five-scene story-arc prompt.
fn story_prompt(topic: &str) -> String {
    format!(
        "Create 5 sequential scenes telling a story about: {topic}\n\
         \n\
         Story arc requirements:\n\
         1. Scene 1 (Introduction): Establish main character and setting, introduce the basic situation\n\
         2. Scene 2 (Rising Action): Show first challenge or development\n\
         3. Scene 3 (Rising Action): Increase tension or progress\n\
         4. Scene 4 (Climax): Show the peak moment or main achievement\n\
         5. Scene 5 (Resolution): Show the outcome or conclusion\n\
         \n\
         Format each scene as:\n\
         Scene X: [Shot type] - [Character details] - [Action] - [Setting] - [Lighting]\n\
         \n\
         Character consistency:\n\
         - Maintain exact same character description across all scenes\n\
         - Format: Name (age gender, physical details, clothing)\n\
         - Maximum 3 characters per scene\n\
         \n\
         Technical requirements:\n\
         - Each scene under 20 words\n\
         - Include shot type (Close-up, Medium, Wide, Full)\n\
         - Clear lighting conditions\n\
         - Single focused action\n\
         - Simple setting"
    )
}

/// The voice-over distillation prompt.
fn narration_prompt(full_text: &str) -> String {
    format!(
        "Create a concise, engaging 30-second narration from this story.\n\
         Focus on the main character's journey and key moments.\n\
         The narration should flow naturally and be suitable for voice-over.\n\
         Keep it under 100 words while maintaining story impact.\n\
         \n\
         Story text:\n\
         {full_text}\n\
         \n\
         Requirements:\n\
         - Start with an engaging introduction of the main character\n\
         - Highlight 2-3 key moments\n\
         - End with the resolution\n\
         - Use natural, conversational language\n\
         - Keep it concise for 30-second narration\n\
         \n\
         Format: Single paragraph narrative suitable for voice-over."
    )
}

/// Fully synthetic story derived from the topic alone.
fn fallback_story(topic: &str) -> (Vec<String>, String) {
    let scenes: Vec<String> = (1..=SCENE_COUNT)
        .map(|n| format!("Scene {} about {}", n, topic))
        .collect();
    let full_text = scenes.join("\n");
    (scenes, full_text)
}
