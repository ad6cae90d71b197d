//! Story records and identifiers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of scenes in every story.
///
/// The scene list is a fixed-length invariant: the story stage pads or
/// truncates whatever the text model returns so that downstream shot
/// construction can rely on exactly this many entries.
pub const SCENE_COUNT: usize = 5;

/// Unique story identifier: `<yyyymmdd>_<sanitized-topic>_<6-hex>`.
///
/// Generated once at pipeline start and immutable thereafter. All blob-store
/// paths for a run are namespaced by this identifier, so concurrent
/// executions for different topics cannot collide.
///
/// # Examples
///
/// ```
/// use storyreel_core::StoryId;
///
/// let id = StoryId::generate("A day at the beach!");
/// assert!(id.as_str().contains("a_day_at_the_beach"));
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
#[serde(transparent)]
pub struct StoryId(String);

impl StoryId {
    /// Generate a fresh identifier for a topic.
    ///
    /// The date prefix keeps listings chronological; the sanitized topic
    /// keeps them human-readable; the random suffix makes them unique.
    pub fn generate(topic: &str) -> Self {
        let date = Utc::now().format("%Y%m%d");
        let suffix: String = Uuid::new_v4().simple().to_string().chars().take(6).collect();
        Self(format!("{}_{}_{}", date, sanitize_topic(topic), suffix))
    }

    /// View the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for StoryId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for StoryId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Sanitize a topic string for use in identifiers and file names.
///
/// Lowercases, maps spaces to underscores, strips everything outside
/// `[a-z0-9_]`, and truncates to 30 characters.
fn sanitize_topic(topic: &str) -> String {
    topic
        .to_lowercase()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
        .take(30)
        .collect()
}

/// The scenes.json key for a 1-based shot number.
pub fn scene_key(shot: usize) -> String {
    format!("shot{}_text", shot)
}

/// A generated story: the unit of work the pipeline renders into video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryRecord {
    /// Unique story identifier
    pub story_id: StoryId,
    /// Original user-supplied topic
    pub topic: String,
    /// Exactly [`SCENE_COUNT`] ordered scene descriptions (scene N maps to shot N)
    pub scenes: Vec<String>,
    /// Raw model output the scenes were parsed from, retained for audit
    /// and character extraction
    pub full_text: String,
    /// Voice-over script distilled from the full text
    pub narration: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl StoryRecord {
    /// The persisted scenes.json form, keyed `shot{n}_text`.
    ///
    /// A `BTreeMap` keeps serialization deterministic.
    pub fn scene_manifest(&self) -> std::collections::BTreeMap<String, String> {
        self.scenes
            .iter()
            .enumerate()
            .map(|(i, scene)| (scene_key(i + 1), scene.clone()))
            .collect()
    }
}

/// Story metadata persisted alongside the scenes.
///
/// Written once before image generation and again after, so partial progress
/// is inspectable even when a later step fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryMetadata {
    /// Story identifier
    pub story_id: StoryId,
    /// Original topic
    pub topic: String,
    /// Creation time
    pub creation_date: DateTime<Utc>,
    /// Number of scenes (always [`SCENE_COUNT`])
    pub scene_count: usize,
    /// Locations of the scene images generated so far
    pub image_locations: Vec<String>,
    /// How many scene images were generated
    #[serde(default)]
    pub generated_images: usize,
    /// Target image resolution
    pub image_resolution: ImageResolution,
}

/// Pixel dimensions of generated scene images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResolution {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn sanitize_strips_punctuation_and_truncates() {
        assert_eq!(sanitize_topic("A day at the beach!"), "a_day_at_the_beach");
        assert_eq!(
            sanitize_topic("a very long topic that keeps going and going"),
            "a_very_long_topic_that_keeps_g"
        );
        assert_eq!(sanitize_topic("Robots & Rockets 2"), "robots__rockets_2");
    }

    #[test]
    fn story_id_matches_expected_shape() {
        let id = StoryId::generate("A day at the beach");
        let re = regex_lite(id.as_str());
        assert!(re, "unexpected story id: {}", id);
    }

    // Hand-rolled check for `^\d{8}_a_day_at_the_beach_[0-9a-f]{6}$` to keep
    // this crate free of a regex dependency.
    fn regex_lite(id: &str) -> bool {
        let mut parts = id.splitn(2, '_');
        let date = parts.next().unwrap_or_default();
        let rest = parts.next().unwrap_or_default();
        date.len() == 8
            && date.chars().all(|c| c.is_ascii_digit())
            && rest.strip_prefix("a_day_at_the_beach_").is_some_and(|suffix| {
                suffix.len() == 6 && suffix.chars().all(|c| c.is_ascii_hexdigit())
            })
    }

    #[test]
    fn story_ids_are_unique_for_the_same_topic() {
        let ids: HashSet<String> = (0..1000)
            .map(|_| StoryId::generate("repeat topic").as_str().to_string())
            .collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn scene_manifest_keys_are_one_based() {
        let record = StoryRecord {
            story_id: StoryId::from("20250101_test_abc123"),
            topic: "test".to_string(),
            scenes: (1..=SCENE_COUNT).map(|n| format!("scene {}", n)).collect(),
            full_text: String::new(),
            narration: String::new(),
            created_at: Utc::now(),
        };
        let manifest = record.scene_manifest();
        assert_eq!(manifest.len(), SCENE_COUNT);
        assert_eq!(manifest.get("shot1_text").map(String::as_str), Some("scene 1"));
        assert_eq!(manifest.get("shot5_text").map(String::as_str), Some("scene 5"));
    }
}
