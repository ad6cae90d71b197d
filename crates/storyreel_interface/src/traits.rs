//! Trait definitions for the generative backends.

use crate::{ImageRequest, JobPoll, MergeJobRequest, SpeechRequest, TextRequest, VideoJobRequest};
use async_trait::async_trait;
use storyreel_core::JobHandle;
use storyreel_error::StoryreelResult;

/// Text generation capability: prompt in, text out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for a prompt.
    async fn generate(&self, req: &TextRequest) -> StoryreelResult<String>;
}

/// Image generation capability: prompt in, image bytes out.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate a PNG image for a prompt.
    async fn generate(&self, req: &ImageRequest) -> StoryreelResult<Vec<u8>>;
}

/// Speech synthesis capability: text in, audio bytes out.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize narration audio for a text.
    async fn synthesize(&self, req: &SpeechRequest) -> StoryreelResult<Vec<u8>>;
}

/// Shared polling surface of the asynchronous job capabilities.
///
/// Polling is read-only with respect to the job: calling it any number of
/// times with the same handle observes status without side effects, which is
/// what makes the monitor loop restartable.
#[async_trait]
pub trait AsyncJobClient: Send + Sync {
    /// Report the current status of a submitted job.
    ///
    /// # Errors
    ///
    /// Returns an error only when the poll call itself fails (transport or
    /// parse failure). A job that failed on the service side is reported as
    /// [`JobPoll::Failed`], not as an `Err`.
    async fn poll(&self, handle: &JobHandle) -> StoryreelResult<JobPoll>;
}

/// Asynchronous silent-video rendering: submit a shot list, poll the job.
#[async_trait]
pub trait SilentVideoJob: AsyncJobClient {
    /// Submit a rendering job and return its handle.
    async fn submit(&self, req: &VideoJobRequest) -> StoryreelResult<JobHandle>;
}

/// Asynchronous narration merge: submit video plus audio, poll the job.
#[async_trait]
pub trait NarrationMergeJob: AsyncJobClient {
    /// Submit a merge job and return its handle.
    async fn submit(&self, req: &MergeJobRequest) -> StoryreelResult<JobHandle>;
}
