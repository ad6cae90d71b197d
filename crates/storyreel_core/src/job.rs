//! Asynchronous job handles and the shared status state machine.

use serde::{Deserialize, Serialize};

/// Opaque identifier for a submitted asynchronous rendering/merging job.
///
/// Owned exclusively by the job monitor for the lifetime of one execution;
/// never persisted. The final path segment doubles as the job-scoped output
/// folder name, which is how the deterministic output location is derived
/// once at submission time.
///
/// # Examples
///
/// ```
/// use storyreel_core::JobHandle;
///
/// let handle = JobHandle::new("arn:aws:bedrock:us-east-1:123:async-invoke/abc123");
/// assert_eq!(handle.job_id(), "abc123");
///
/// let bare = JobHandle::new("job-42");
/// assert_eq!(bare.job_id(), "job-42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(transparent)]
pub struct JobHandle(String);

impl JobHandle {
    /// Wrap a raw handle string returned by a job submission.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// View the raw handle.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The job identifier: the last `/`-separated segment of the handle.
    pub fn job_id(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

/// Status of an asynchronous external job, as classified by the monitor.
///
/// `InProgress` is the only non-terminal state. `TimedOut` is a local
/// decision made when the monitoring budget is exhausted, regardless of what
/// the external job reports; `Error` means polling itself failed, which is
/// distinct from the external job reporting `Failed`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum JobStatus {
    /// Job accepted by the external service, no poll observed yet
    Submitted,
    /// External job still running
    InProgress,
    /// External job finished and produced output
    Completed,
    /// External job reported failure
    Failed,
    /// Monitoring budget exceeded while the job was still in progress
    TimedOut,
    /// Polling the job failed (transport/parse error on our side)
    Error,
}

impl JobStatus {
    /// Whether this status ends the monitoring loop.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, JobStatus::Submitted | JobStatus::InProgress)
    }
}
