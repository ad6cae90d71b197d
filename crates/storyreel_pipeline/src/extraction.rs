//! Utilities for extracting structured scene data from model responses.
//!
//! Text models return the five-scene story in loosely structured prose:
//! scene-number markers, markdown headers, numbered lists, stray labels.
//! This module turns that into the fixed-length scene list the rest of the
//! pipeline relies on, and keeps the per-shot text clean enough to feed to
//! the video model.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use storyreel_core::SCENE_COUNT;
use storyreel_error::{GenerationError, GenerationErrorKind, StoryreelResult};

/// Parse a model response into exactly [`SCENE_COUNT`] scenes.
///
/// Splits on scene-number markers (`Scene 1`, `### Scene 1`, `1.`), strips
/// leading labels, truncates extras, and pads missing entries with a
/// deterministic filler derived from the topic.
///
/// # Errors
///
/// Returns an error when the response contains no usable scene text at all;
/// the story stage downgrades that to a fully synthetic scene list.
///
/// # Examples
///
/// ```
/// use storyreel_pipeline::parse_scenes;
///
/// let response = "Scene 1: Wide shot - Maya on the shore\n\
///     Scene 2: Close-up - Maya finds a shell\n\
///     Scene 3: Medium shot - waves rise";
/// let scenes = parse_scenes(response, "a day at the beach").unwrap();
/// assert_eq!(scenes.len(), 5);
/// assert!(scenes[0].contains("Maya"));
/// assert!(scenes[4].contains("a day at the beach"));
/// ```
pub fn parse_scenes(response: &str, topic: &str) -> StoryreelResult<Vec<String>> {
    let marker = Regex::new(r"(?:###\s*Scene\s*\d+|Scene\s*\d+|\d+\.)").map_err(|e| {
        GenerationError::new(GenerationErrorKind::TextGeneration(format!(
            "Invalid scene marker pattern: {}",
            e
        )))
    })?;
    let label = Regex::new(r"^.{1,30}:?\s*\n").map_err(|e| {
        GenerationError::new(GenerationErrorKind::TextGeneration(format!(
            "Invalid label pattern: {}",
            e
        )))
    })?;

    let mut scenes: Vec<String> = marker
        .split(response)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| label.replace(s, "").trim().trim_start_matches(':').trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if scenes.is_empty() {
        return Err(GenerationError::new(GenerationErrorKind::EmptyResponse).into());
    }

    scenes.truncate(SCENE_COUNT);
    while scenes.len() < SCENE_COUNT {
        scenes.push(format!("Scene {} about {}", scenes.len() + 1, topic));
    }

    Ok(scenes)
}

/// Clean a scene text for use as a shot prompt.
///
/// Strips markdown bold markers and a leading `N.` numbering left over from
/// list-formatted responses.
///
/// # Examples
///
/// ```
/// use storyreel_pipeline::clean_scene_text;
///
/// assert_eq!(clean_scene_text("**1. Maya waves**"), "Maya waves");
/// assert_eq!(clean_scene_text("  plain text  "), "plain text");
/// ```
pub fn clean_scene_text(text: &str) -> String {
    let mut text = text.trim().replace("**", "");

    if text.starts_with(|c: char| c.is_ascii_digit()) {
        if let Some((_, rest)) = text.split_once('.') {
            text = rest.to_string();
        }
    }

    text.trim().to_string()
}

/// A character surfaced from the full story text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterMention {
    /// The sentence in which the character first appears
    pub first_appearance: String,
    /// 1-based scene numbers the character appears in
    pub scenes_present: Vec<usize>,
}

/// Extract named characters and their scene appearances from the full text.
///
/// Capitalized name sequences are treated as character names. Retained for
/// audit output and consistency checks; the scene texts themselves are the
/// source of truth for rendering.
pub fn extract_characters(full_text: &str) -> BTreeMap<String, CharacterMention> {
    let name = match Regex::new(r"[A-Z][a-z]+(?:\s[A-Z][a-z]+)*") {
        Ok(re) => re,
        Err(_) => return BTreeMap::new(),
    };

    // Index 0 is whatever precedes the first "Scene" marker, so the scene
    // number is the split index itself.
    let mut characters: BTreeMap<String, CharacterMention> = BTreeMap::new();
    for (index, scene) in full_text.split("Scene").enumerate().skip(1) {
        for found in name.find_iter(scene) {
            let candidate = found.as_str();
            let entry = characters.entry(candidate.to_string());
            match entry {
                std::collections::btree_map::Entry::Vacant(vacant) => {
                    let sentence = scene
                        .split('.')
                        .find(|s| s.contains(candidate))
                        .unwrap_or("")
                        .trim()
                        .to_string();
                    vacant.insert(CharacterMention {
                        first_appearance: sentence,
                        scenes_present: vec![index],
                    });
                }
                std::collections::btree_map::Entry::Occupied(mut occupied) => {
                    let scenes = &mut occupied.get_mut().scenes_present;
                    if scenes.last() != Some(&index) {
                        scenes.push(index);
                    }
                }
            }
        }
    }

    characters
}
