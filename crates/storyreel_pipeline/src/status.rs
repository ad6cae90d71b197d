//! Projection of raw execution state into the client-facing status document.

use chrono::{DateTime, Utc};
use serde::Serialize;
use storyreel_core::ExecutionRecord;
use uuid::Uuid;

/// Raw state of an execution as tracked by the orchestration substrate.
#[derive(Debug, Clone, PartialEq)]
pub enum RawExecutionState {
    /// The orchestrator task is still running
    Running,
    /// The orchestrator finished and produced its record
    ///
    /// A stage may still have failed (the record carries the outcome); this
    /// variant means the execution itself ran to completion.
    Succeeded(Box<ExecutionRecord>),
    /// The orchestrator task itself failed before producing a record
    Failed {
        /// The execution-level error
        error: String,
        /// When the failure was observed
        timestamp: DateTime<Utc>,
    },
}

/// One tracked execution: when it started and where it is now.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionSlot {
    /// When the start operation accepted the request
    pub started_at: DateTime<Utc>,
    /// Current raw state
    pub state: RawExecutionState,
}

/// The document a polling client receives while the execution is running.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunningDocument {
    /// Always `"IN_PROGRESS"`
    pub status: String,
    /// The execution being polled
    pub execution_id: Uuid,
    /// When the execution started
    pub start_time: DateTime<Utc>,
    /// Guidance for the client
    pub message: String,
}

/// The document a client receives when the execution itself failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureDocument {
    /// Always `"Error"`
    pub status: String,
    /// The execution being polled
    pub execution_id: Uuid,
    /// The execution-level error
    pub error: String,
    /// When the failure was observed
    pub timestamp: DateTime<Utc>,
}

/// The client-facing status document.
///
/// Serializes untagged: a terminal successful execution's document *is* the
/// accumulated [`ExecutionRecord`], not a re-derived summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatusDocument {
    /// Execution still running; no stage details yet
    Running(RunningDocument),
    /// Execution finished; the record verbatim
    Finished(Box<ExecutionRecord>),
    /// Execution failed at the substrate level
    Failed(FailureDocument),
}

/// Project a raw execution state into the client-facing document.
///
/// This is a pure mapping: the same slot always yields the same projection,
/// byte for byte, because polling clients may invoke it repeatedly.
pub fn project(execution_id: Uuid, slot: &ExecutionSlot) -> StatusDocument {
    match &slot.state {
        RawExecutionState::Running => StatusDocument::Running(RunningDocument {
            status: "IN_PROGRESS".to_string(),
            execution_id,
            start_time: slot.started_at,
            message: "Pipeline execution in progress. Poll the status operation for updates."
                .to_string(),
        }),
        RawExecutionState::Succeeded(record) => StatusDocument::Finished(record.clone()),
        RawExecutionState::Failed { error, timestamp } => {
            StatusDocument::Failed(FailureDocument {
                status: "Error".to_string(),
                execution_id,
                error: error.clone(),
                timestamp: *timestamp,
            })
        }
    }
}
