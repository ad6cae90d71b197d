//! Canonical blob layout for pipeline artifacts.
//!
//! All story artifacts are namespaced by story id; rendered video lands in a
//! job-scoped folder derived from the job handle. Keeping the layout in one
//! place is what lets stages hand each other nothing but identifiers.
//!
//! ```text
//! {source}/
//! ├── {story_id}/scenes.json        scene texts, shot{n}_text keys
//! ├── {story_id}/metadata.json      story metadata
//! └── {story_id}/scene_{n}.png      optional per-scene images
//! {destination}/
//! ├── {job_id}/output.mp4           silent video (job-scoped folder)
//! ├── {story_id}/audio/narration.mp3
//! └── {story_id}/final/final_output.mp4
//! ```

use storyreel_core::{BlobLocation, StoryId};

/// Location of a story's scenes.json.
pub fn scenes_json(bucket: &str, story_id: &StoryId) -> BlobLocation {
    BlobLocation::new(bucket, format!("{}/scenes.json", story_id))
}

/// Location of a story's metadata.json.
pub fn metadata_json(bucket: &str, story_id: &StoryId) -> BlobLocation {
    BlobLocation::new(bucket, format!("{}/metadata.json", story_id))
}

/// Location of the image for a 1-based shot number.
pub fn scene_image(bucket: &str, story_id: &StoryId, shot: usize) -> BlobLocation {
    BlobLocation::new(bucket, format!("{}/scene_{}.png", story_id, shot))
}

/// Job-scoped output folder for a silent-video job.
pub fn job_output_folder(bucket: &str, job_id: &str) -> BlobLocation {
    BlobLocation::new(bucket, job_id)
}

/// The silent video inside a job output folder.
pub fn job_output_video(folder: &BlobLocation) -> BlobLocation {
    folder.join("output.mp4")
}

/// Location of a story's narration audio.
pub fn narration_audio(bucket: &str, story_id: &StoryId) -> BlobLocation {
    BlobLocation::new(bucket, format!("{}/audio/narration.mp3", story_id))
}

/// Location of a story's final narrated video.
pub fn final_output(bucket: &str, story_id: &StoryId) -> BlobLocation {
    BlobLocation::new(bucket, format!("{}/final/final_output.mp4", story_id))
}
