//! Shared fake capabilities for pipeline integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use storyreel_core::JobHandle;
use storyreel_error::{GenerationError, GenerationErrorKind, StoryreelResult};
use storyreel_interface::{
    AsyncJobClient, ImageGenerator, ImageRequest, JobPoll, MergeJobRequest, NarrationMergeJob,
    SilentVideoJob, SpeechRequest, SpeechSynthesizer, TextGenerator, TextRequest,
    VideoJobRequest,
};
use storyreel_pipeline::PipelineConfig;
use storyreel_storage::{BlobStore, ContentKind, MemoryBlobStore};

/// Test configuration: small buckets names, image pacing off.
pub fn test_config() -> PipelineConfig {
    PipelineConfig::from_toml(
        r#"
        [buckets]
        source = "src"
        destination = "dest"

        [images]
        per_minute = 0
        "#,
    )
    .unwrap()
}

/// A five-scene story response in the format the story prompt asks for.
pub fn scripted_story() -> String {
    "Scene 1: Wide shot - Maya (8 girl, red swimsuit) - builds a sandcastle - sunny shore - golden light\n\
     Scene 2: Close-up - Maya - finds a glinting shell - tide pools - soft morning light\n\
     Scene 3: Medium shot - Maya - waves wash the castle walls - rising tide - bright noon light\n\
     Scene 4: Full shot - Maya - rebuilds the castle taller - crowded beach - warm afternoon light\n\
     Scene 5: Wide shot - Maya - waves goodbye to the sea - sunset shore - amber light"
        .to_string()
}

/// Text generator that answers from a scripted queue, one entry per call.
///
/// An exhausted queue yields an upstream error, which the story stage is
/// expected to absorb.
pub struct ScriptedTextGenerator {
    responses: Mutex<VecDeque<StoryreelResult<String>>>,
    pub calls: AtomicU32,
}

impl ScriptedTextGenerator {
    pub fn new(responses: Vec<StoryreelResult<String>>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            calls: AtomicU32::new(0),
        }
    }

    /// A generator scripted for one full story-stage run: the story text,
    /// then a narration.
    pub fn story_and_narration() -> Self {
        Self::new(vec![
            Ok(scripted_story()),
            Ok("Maya spends a day at the beach, loses her castle to the tide, and builds it back taller.".to_string()),
        ])
    }
}

#[async_trait]
impl TextGenerator for ScriptedTextGenerator {
    async fn generate(&self, _req: &TextRequest) -> StoryreelResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(GenerationError::new(GenerationErrorKind::TextGeneration(
                    "scripted responses exhausted".to_string(),
                ))
                .into())
            })
    }
}

/// Image generator returning fixed bytes, with optional scripted failures.
pub struct StaticImageGenerator {
    pub calls: AtomicU32,
    fail_all: bool,
}

impl StaticImageGenerator {
    pub fn new() -> Self {
        Self {
            calls: AtomicU32::new(0),
            fail_all: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            calls: AtomicU32::new(0),
            fail_all: true,
        }
    }
}

#[async_trait]
impl ImageGenerator for StaticImageGenerator {
    async fn generate(&self, _req: &ImageRequest) -> StoryreelResult<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_all {
            return Err(GenerationError::new(GenerationErrorKind::ImageGeneration(
                "image backend down".to_string(),
            ))
            .into());
        }
        Ok(vec![0x89, 0x50, 0x4e, 0x47])
    }
}

/// Speech synthesizer returning fixed MP3-ish bytes.
pub struct StaticSpeechSynthesizer {
    pub calls: AtomicU32,
}

impl StaticSpeechSynthesizer {
    pub fn new() -> Self {
        Self {
            calls: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for StaticSpeechSynthesizer {
    async fn synthesize(&self, _req: &SpeechRequest) -> StoryreelResult<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![0xff, 0xfb, 0x90, 0x00])
    }
}

/// Silent-video job that completes after a fixed number of polls and, on
/// completion, writes `output.mp4` into its job folder the way the real
/// rendering service does.
pub struct FakeVideoJob {
    handle: String,
    completes_after: u32,
    terminal: JobPoll,
    pub polls: AtomicU32,
    pub submitted: Mutex<Option<VideoJobRequest>>,
    store: Arc<MemoryBlobStore>,
}

impl FakeVideoJob {
    pub fn completing(handle: &str, completes_after: u32, store: Arc<MemoryBlobStore>) -> Self {
        Self {
            handle: handle.to_string(),
            completes_after,
            terminal: JobPoll::Completed,
            polls: AtomicU32::new(0),
            submitted: Mutex::new(None),
            store,
        }
    }

    pub fn failing(handle: &str, store: Arc<MemoryBlobStore>) -> Self {
        Self {
            handle: handle.to_string(),
            completes_after: 1,
            terminal: JobPoll::Failed {
                reason: "render exploded".to_string(),
            },
            polls: AtomicU32::new(0),
            submitted: Mutex::new(None),
            store,
        }
    }

    /// A job that never leaves `InProgress`.
    pub fn stuck(handle: &str, store: Arc<MemoryBlobStore>) -> Self {
        Self {
            handle: handle.to_string(),
            completes_after: u32::MAX,
            terminal: JobPoll::Completed,
            polls: AtomicU32::new(0),
            submitted: Mutex::new(None),
            store,
        }
    }
}

#[async_trait]
impl AsyncJobClient for FakeVideoJob {
    async fn poll(&self, handle: &JobHandle) -> StoryreelResult<JobPoll> {
        let poll = self.polls.fetch_add(1, Ordering::SeqCst) + 1;
        if poll < self.completes_after {
            return Ok(JobPoll::InProgress);
        }
        if self.terminal == JobPoll::Completed {
            let destination = self
                .submitted
                .lock()
                .unwrap()
                .as_ref()
                .map(|req| req.destination_bucket.clone())
                .unwrap_or_else(|| "dest".to_string());
            let output = storyreel_storage::layout::job_output_video(
                &storyreel_storage::layout::job_output_folder(&destination, handle.job_id()),
            );
            self.store
                .put(&output, &[0u8; 64], ContentKind::Video)
                .await?;
        }
        Ok(self.terminal.clone())
    }
}

#[async_trait]
impl SilentVideoJob for FakeVideoJob {
    async fn submit(&self, req: &VideoJobRequest) -> StoryreelResult<JobHandle> {
        *self.submitted.lock().unwrap() = Some(req.clone());
        Ok(JobHandle::new(self.handle.clone()))
    }
}

/// Narration-merge job that completes after a fixed number of polls.
pub struct FakeMergeJob {
    handle: String,
    completes_after: u32,
    terminal: JobPoll,
    pub polls: AtomicU32,
    pub submitted: Mutex<Option<MergeJobRequest>>,
}

impl FakeMergeJob {
    pub fn completing(handle: &str, completes_after: u32) -> Self {
        Self {
            handle: handle.to_string(),
            completes_after,
            terminal: JobPoll::Completed,
            polls: AtomicU32::new(0),
            submitted: Mutex::new(None),
        }
    }

    pub fn failing(handle: &str) -> Self {
        Self {
            handle: handle.to_string(),
            completes_after: 1,
            terminal: JobPoll::Failed {
                reason: "merge exploded".to_string(),
            },
            polls: AtomicU32::new(0),
            submitted: Mutex::new(None),
        }
    }
}

#[async_trait]
impl AsyncJobClient for FakeMergeJob {
    async fn poll(&self, _handle: &JobHandle) -> StoryreelResult<JobPoll> {
        let poll = self.polls.fetch_add(1, Ordering::SeqCst) + 1;
        if poll < self.completes_after {
            Ok(JobPoll::InProgress)
        } else {
            Ok(self.terminal.clone())
        }
    }
}

#[async_trait]
impl NarrationMergeJob for FakeMergeJob {
    async fn submit(&self, req: &MergeJobRequest) -> StoryreelResult<JobHandle> {
        *self.submitted.lock().unwrap() = Some(req.clone());
        Ok(JobHandle::new(self.handle.clone()))
    }
}
