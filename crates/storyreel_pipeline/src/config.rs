//! Pipeline configuration types and loading.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use storyreel_error::{ConfigError, StoryreelResult};

/// Complete configuration for a pipeline instance.
///
/// Every knob has a default, so an empty TOML file is a valid configuration.
///
/// # Example TOML
///
/// ```toml
/// narrate = true
///
/// [buckets]
/// source = "story-images"
/// destination = "video-output"
///
/// [monitor]
/// budget_seconds = 900
/// poll_interval_seconds = 15
///
/// [video]
/// fps = 24
/// dimension = "1280x720"
/// seed = 42
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct PipelineConfig {
    /// Blob-store buckets
    #[serde(default)]
    buckets: BucketConfig,
    /// Job monitoring budget and poll interval
    #[serde(default)]
    monitor: MonitorConfig,
    /// Silent-video render settings
    #[serde(default)]
    video: VideoConfig,
    /// Narration speech settings
    #[serde(default)]
    speech: SpeechConfig,
    /// Scene image generation settings
    #[serde(default)]
    images: ImageConfig,
    /// Whether to run the narration/merge stage after the silent video
    #[serde(default = "default_narrate")]
    narrate: bool,
}

fn default_narrate() -> bool {
    true
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            buckets: BucketConfig::default(),
            monitor: MonitorConfig::default(),
            video: VideoConfig::default(),
            speech: SpeechConfig::default(),
            images: ImageConfig::default(),
            narrate: default_narrate(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> StoryreelResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::new(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(contents: &str) -> StoryreelResult<Self> {
        toml::from_str(contents)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)).into())
    }

    /// Override whether the merge stage runs.
    pub fn with_narrate(mut self, narrate: bool) -> Self {
        self.narrate = narrate;
        self
    }
}

/// Blob-store bucket names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct BucketConfig {
    /// Bucket holding story artifacts (scenes, metadata, images)
    #[serde(default = "default_source_bucket")]
    source: String,
    /// Bucket receiving rendered video output
    #[serde(default = "default_destination_bucket")]
    destination: String,
}

fn default_source_bucket() -> String {
    "story-images".to_string()
}

fn default_destination_bucket() -> String {
    "video-output".to_string()
}

impl Default for BucketConfig {
    fn default() -> Self {
        Self {
            source: default_source_bucket(),
            destination: default_destination_bucket(),
        }
    }
}

/// Job monitoring budget and poll interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct MonitorConfig {
    /// Maximum wall-clock seconds to poll before declaring timeout
    #[serde(default = "default_budget_seconds")]
    budget_seconds: u64,
    /// Seconds between polls
    #[serde(default = "default_poll_interval_seconds")]
    poll_interval_seconds: u64,
}

fn default_budget_seconds() -> u64 {
    900
}

fn default_poll_interval_seconds() -> u64 {
    15
}

impl MonitorConfig {
    /// The monitoring budget as a [`Duration`].
    pub fn budget(&self) -> Duration {
        Duration::from_secs(self.budget_seconds)
    }

    /// The poll interval as a [`Duration`].
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_seconds)
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            budget_seconds: default_budget_seconds(),
            poll_interval_seconds: default_poll_interval_seconds(),
        }
    }
}

/// Silent-video render settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct VideoConfig {
    /// Frames per second
    #[serde(default = "default_fps")]
    fps: u32,
    /// Output dimension
    #[serde(default = "default_dimension")]
    dimension: String,
    /// Render seed, fixed for reproducible runs
    #[serde(default = "default_seed")]
    seed: u64,
}

fn default_fps() -> u32 {
    24
}

fn default_dimension() -> String {
    "1280x720".to_string()
}

fn default_seed() -> u64 {
    42
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            dimension: default_dimension(),
            seed: default_seed(),
        }
    }
}

/// Narration speech settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct SpeechConfig {
    /// Voice identifier
    #[serde(default = "default_voice")]
    voice: String,
    /// Language code
    #[serde(default = "default_language")]
    language: String,
    /// Output sample rate in Hz
    #[serde(default = "default_sample_rate")]
    sample_rate: u32,
}

fn default_voice() -> String {
    "Ruth".to_string()
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_sample_rate() -> u32 {
    24000
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            voice: default_voice(),
            language: default_language(),
            sample_rate: default_sample_rate(),
        }
    }
}

/// Scene image generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ImageConfig {
    /// Target width in pixels
    #[serde(default = "default_image_width")]
    width: u32,
    /// Target height in pixels
    #[serde(default = "default_image_height")]
    height: u32,
    /// Maximum image calls per minute; `0` disables pacing
    #[serde(default = "default_images_per_minute")]
    per_minute: u32,
    /// Features the image model should avoid
    #[serde(default = "default_negative_prompt")]
    negative_prompt: String,
}

fn default_image_width() -> u32 {
    1280
}

fn default_image_height() -> u32 {
    720
}

fn default_images_per_minute() -> u32 {
    30
}

fn default_negative_prompt() -> String {
    "blurry, distorted, melting, overlapping elements, inconsistent appearances, \
     changing features, morphing characters"
        .to_string()
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            width: default_image_width(),
            height: default_image_height(),
            per_minute: default_images_per_minute(),
            negative_prompt: default_negative_prompt(),
        }
    }
}
