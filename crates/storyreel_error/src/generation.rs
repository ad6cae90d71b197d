//! Upstream generative capability error types.

/// Specific error conditions for calls into the generative backends.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GenerationErrorKind {
    /// Text generation request failed
    #[display("Text generation failed: {}", _0)]
    TextGeneration(String),
    /// The text model returned an empty response
    #[display("Text model returned an empty response")]
    EmptyResponse,
    /// Image generation request failed
    #[display("Image generation failed: {}", _0)]
    ImageGeneration(String),
    /// Speech synthesis request failed
    #[display("Speech synthesis failed: {}", _0)]
    SpeechSynthesis(String),
    /// Submission of an asynchronous job failed
    #[display("Job submission failed: {}", _0)]
    JobSubmission(String),
    /// Polling an asynchronous job failed (transport or parse failure)
    #[display("Job poll failed: {}", _0)]
    JobPoll(String),
}

/// Error for a failed call into an external generative service.
///
/// Distinct from the external job itself reporting failure: this type covers
/// the request/response path on our side of the wire.
///
/// # Examples
///
/// ```
/// use storyreel_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::JobPoll(
///     "connection reset".to_string(),
/// ));
/// assert!(format!("{}", err).contains("poll"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new generation error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
