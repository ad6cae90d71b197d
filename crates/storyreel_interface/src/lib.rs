//! Capability trait definitions for the storyreel pipeline.
//!
//! The generative backends (text, image, speech, async video rendering and
//! merging) are external collaborators. This crate pins down the
//! request/response surface the pipeline consumes, so backends can be
//! swapped out, or faked in tests, without touching stage logic.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod types;

pub use traits::{
    AsyncJobClient, ImageGenerator, NarrationMergeJob, SilentVideoJob, SpeechSynthesizer,
    TextGenerator,
};
pub use types::{
    ImageRequest, JobPoll, MergeJobRequest, SpeechRequest, TextRequest, TextRequestBuilder,
    VideoJobRequest, VideoSettings,
};
