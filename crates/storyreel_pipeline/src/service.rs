//! The execution service: the start/status operations an external caller sees.

use crate::{project, ExecutionSlot, Pipeline, RawExecutionState, StatusDocument};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use storyreel_error::{StoryreelResult, ValidationError};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Response to a successful start operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StartResponse {
    /// Identifier to poll the status operation with
    pub execution_id: Uuid,
    /// When the execution was accepted
    pub start_time: DateTime<Utc>,
    /// Always `"IN_PROGRESS"`
    pub status: String,
    /// Guidance for the client
    pub message: String,
}

/// Runs pipeline executions and answers status queries about them.
///
/// Each execution is an independent, stateless unit of work on its own
/// `tokio` task; the only shared state is the slot registry, keyed by the
/// execution identifier this service issues. Concurrent re-invocation for
/// the same topic simply produces a new story id; same-story retries are a
/// client responsibility.
pub struct ExecutionService {
    pipeline: Arc<Pipeline>,
    executions: Arc<RwLock<HashMap<Uuid, ExecutionSlot>>>,
}

impl ExecutionService {
    /// Create a service around a wired pipeline.
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            executions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Start a pipeline execution for a topic.
    ///
    /// Returns immediately with the execution identifier; the pipeline runs
    /// in the background.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the topic is missing or empty.
    #[tracing::instrument(skip(self), fields(topic = %topic))]
    pub async fn start(&self, topic: &str) -> StoryreelResult<StartResponse> {
        let topic = topic.trim().to_string();
        if topic.is_empty() {
            return Err(ValidationError::new("topic is required").into());
        }

        let execution_id = Uuid::new_v4();
        let start_time = Utc::now();

        self.executions.write().await.insert(
            execution_id,
            ExecutionSlot {
                started_at: start_time,
                state: RawExecutionState::Running,
            },
        );
        tracing::info!(execution_id = %execution_id, "Accepted pipeline execution");

        let pipeline = Arc::clone(&self.pipeline);
        let executions = Arc::clone(&self.executions);
        let run_topic = topic.clone();
        tokio::spawn(async move {
            let state = match pipeline.run(execution_id, &run_topic).await {
                Ok(record) => {
                    tracing::info!(
                        execution_id = %execution_id,
                        status = %record.status,
                        "Execution finished"
                    );
                    RawExecutionState::Succeeded(Box::new(record))
                }
                Err(e) => {
                    tracing::error!(execution_id = %execution_id, error = %e, "Execution failed");
                    RawExecutionState::Failed {
                        error: e.to_string(),
                        timestamp: Utc::now(),
                    }
                }
            };

            if let Some(slot) = executions.write().await.get_mut(&execution_id) {
                slot.state = state;
            }
        });

        Ok(StartResponse {
            execution_id,
            start_time,
            status: "IN_PROGRESS".to_string(),
            message: format!(
                "Video generation started for topic '{}'. Poll the status operation with the execution id.",
                topic
            ),
        })
    }

    /// Query the status of an execution.
    ///
    /// Always returns a well-formed document for known executions: stage
    /// and execution failures are embedded in the document, never surfaced
    /// as bare errors.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the execution id is unknown.
    #[tracing::instrument(skip(self), fields(execution_id = %execution_id))]
    pub async fn status(&self, execution_id: Uuid) -> StoryreelResult<StatusDocument> {
        let executions = self.executions.read().await;
        let slot = executions.get(&execution_id).ok_or_else(|| {
            ValidationError::new(format!("unknown execution id: {}", execution_id))
        })?;
        Ok(project(execution_id, slot))
    }
}
