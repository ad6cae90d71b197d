//! The shared asynchronous job monitoring loop.

use crate::MonitorConfig;
use std::time::Duration;
use storyreel_core::{BlobLocation, JobHandle, JobStatus};
use storyreel_interface::{AsyncJobClient, JobPoll};

/// Outcome of monitoring one asynchronous job to a terminal state.
#[derive(Debug, Clone, PartialEq)]
pub struct StageOutcome {
    /// The terminal status the monitor classified
    pub status: JobStatus,
    /// The job's output location, present only on [`JobStatus::Completed`]
    pub location: Option<BlobLocation>,
}

impl StageOutcome {
    fn terminal(status: JobStatus) -> Self {
        Self {
            status,
            location: None,
        }
    }
}

/// Polls a submitted job to completion under a bounded wall-clock budget.
///
/// This loop is deliberately conservative:
/// - it never spins unboundedly: the budget is mandatory and checked
///   locally on every iteration, regardless of what the external job
///   reports;
/// - it never busy-polls: every non-terminal poll is followed by a fixed
///   sleep;
/// - it is read-only with respect to the job, so re-running it with the same
///   handle cannot double-submit anything.
///
/// Sleeps use `tokio::time`, so tests can drive the loop under a paused
/// clock (`#[tokio::test(start_paused = true)]`).
#[derive(Debug, Clone, Copy)]
pub struct JobMonitor {
    budget: Duration,
    poll_interval: Duration,
}

impl JobMonitor {
    /// Create a monitor with an explicit budget and poll interval.
    pub fn new(budget: Duration, poll_interval: Duration) -> Self {
        Self {
            budget,
            poll_interval,
        }
    }

    /// Create a monitor from configuration.
    pub fn from_config(config: &MonitorConfig) -> Self {
        Self::new(config.budget(), config.poll_interval())
    }

    /// Monitor a job until it reaches a terminal state.
    ///
    /// Classification:
    /// - the external job's own terminal report (`Completed`/`Failed`) is
    ///   returned verbatim, with `output` attached only on completion;
    /// - a failed poll call returns [`JobStatus::Error`] immediately, with
    ///   no poll retry in this design;
    /// - elapsed time past the budget while the job is still in progress
    ///   returns [`JobStatus::TimedOut`] without polling again.
    #[tracing::instrument(skip(self, client), fields(handle = %handle, output = %output))]
    pub async fn monitor<C>(
        &self,
        client: &C,
        handle: &JobHandle,
        output: &BlobLocation,
    ) -> StageOutcome
    where
        C: AsyncJobClient + ?Sized,
    {
        let started = tokio::time::Instant::now();
        tracing::info!(folder = %output, "Monitoring job output folder");

        loop {
            let poll = match client.poll(handle).await {
                Ok(poll) => poll,
                Err(e) => {
                    tracing::error!(error = %e, "Error polling job status");
                    return StageOutcome::terminal(JobStatus::Error);
                }
            };

            match poll {
                JobPoll::Completed => {
                    tracing::info!(elapsed_secs = started.elapsed().as_secs(), "Job completed");
                    return StageOutcome {
                        status: JobStatus::Completed,
                        location: Some(output.clone()),
                    };
                }
                JobPoll::Failed { reason } => {
                    tracing::error!(reason = %reason, "Job failed");
                    return StageOutcome::terminal(JobStatus::Failed);
                }
                JobPoll::InProgress => {
                    tracing::debug!(
                        elapsed_secs = started.elapsed().as_secs(),
                        "Job still in progress"
                    );
                }
            }

            if started.elapsed() > self.budget {
                tracing::warn!(
                    budget_secs = self.budget.as_secs(),
                    "Maximum monitoring time exceeded"
                );
                return StageOutcome::terminal(JobStatus::TimedOut);
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
