//! Request and response types for the generative capabilities.

use serde::{Deserialize, Serialize};
use storyreel_core::{BlobLocation, Shot};

/// A text generation request.
///
/// # Examples
///
/// ```
/// use storyreel_interface::TextRequest;
///
/// let request = TextRequest::builder()
///     .prompt("Create 5 sequential scenes about: a day at the beach")
///     .max_tokens(300u32)
///     .temperature(0.7)
///     .build()
///     .unwrap();
///
/// assert_eq!(request.max_tokens, Some(300));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_builder::Builder)]
#[builder(setter(into, strip_option), default)]
pub struct TextRequest {
    /// The prompt to send
    pub prompt: String,
    /// Maximum number of tokens to generate
    pub max_tokens: Option<u32>,
    /// Sampling temperature (0.0 to 1.0)
    pub temperature: Option<f32>,
}

impl TextRequest {
    /// Start building a request.
    pub fn builder() -> TextRequestBuilder {
        TextRequestBuilder::default()
    }
}

impl Default for TextRequest {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            max_tokens: None,
            temperature: None,
        }
    }
}

/// An image generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRequest {
    /// The prompt describing the image
    pub prompt: String,
    /// Target width in pixels
    pub width: u32,
    /// Target height in pixels
    pub height: u32,
    /// Features the model should avoid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
}

/// A speech synthesis request (text to audio bytes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechRequest {
    /// The narration text to speak
    pub text: String,
    /// Voice identifier
    pub voice: String,
    /// Language code (e.g. "en-US")
    pub language: String,
    /// Output sample rate in Hz
    pub sample_rate: u32,
}

/// Rendering settings for a silent-video job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSettings {
    /// Frames per second
    pub fps: u32,
    /// Output dimension, e.g. "1280x720"
    pub dimension: String,
    /// Render seed, fixed for reproducible runs
    pub seed: u64,
}

/// A silent-video job submission: an ordered shot list plus render settings.
///
/// The external service writes its output into a job-scoped folder under
/// `destination_bucket`; the folder name is derived from the returned handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoJobRequest {
    /// Ordered shots, one per scene
    pub shots: Vec<Shot>,
    /// Render settings
    pub settings: VideoSettings,
    /// Bucket the service writes output into
    pub destination_bucket: String,
}

/// A narration-merge job submission.
///
/// `video` must be the exact silent-video location the video stage produced
/// for this story, never a guessed path, so concurrent executions cannot
/// cross-contaminate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeJobRequest {
    /// The silent video to merge onto
    pub video: BlobLocation,
    /// The narration audio track
    pub audio: BlobLocation,
    /// Where the merged output must land
    pub output: BlobLocation,
}

/// What an external job reports when polled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobPoll {
    /// Still running
    InProgress,
    /// Finished and wrote its output
    Completed,
    /// Failed on the service side
    Failed {
        /// Service-reported reason
        reason: String,
    },
}
