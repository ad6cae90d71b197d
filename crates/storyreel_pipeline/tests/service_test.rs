//! Execution service tests: the start/status operations.

mod test_utils;

use std::sync::Arc;
use std::time::Duration;
use storyreel_error::StoryreelErrorKind;
use storyreel_pipeline::{ExecutionService, Pipeline, StatusDocument};
use storyreel_storage::MemoryBlobStore;
use test_utils::{
    test_config, FakeMergeJob, FakeVideoJob, ScriptedTextGenerator, StaticImageGenerator,
    StaticSpeechSynthesizer,
};
use uuid::Uuid;

fn service(store: Arc<MemoryBlobStore>) -> ExecutionService {
    let pipeline = Pipeline::new(
        Arc::new(ScriptedTextGenerator::story_and_narration()),
        Arc::new(StaticImageGenerator::new()),
        Arc::new(StaticSpeechSynthesizer::new()),
        Arc::new(FakeVideoJob::completing("job-svc", 2, store.clone())),
        Arc::new(FakeMergeJob::completing("merge-svc", 2)),
        store,
        test_config(),
    );
    ExecutionService::new(pipeline)
}

#[tokio::test]
async fn start_rejects_an_empty_topic() {
    let service = service(Arc::new(MemoryBlobStore::new()));

    for topic in ["", "   ", "\n"] {
        let result = service.start(topic).await;
        assert!(matches!(
            result.unwrap_err().kind(),
            StoryreelErrorKind::Validation(_)
        ));
    }
}

#[tokio::test]
async fn status_of_an_unknown_execution_is_a_validation_error() {
    let service = service(Arc::new(MemoryBlobStore::new()));

    let result = service.status(Uuid::new_v4()).await;
    assert!(matches!(
        result.unwrap_err().kind(),
        StoryreelErrorKind::Validation(_)
    ));
}

#[tokio::test(start_paused = true)]
async fn start_returns_in_progress_and_the_execution_completes() {
    let service = service(Arc::new(MemoryBlobStore::new()));

    let response = service.start("A day at the beach").await.unwrap();
    assert_eq!(response.status, "IN_PROGRESS");

    // Poll the status operation until the execution settles.
    let mut finished = None;
    for _ in 0..200 {
        match service.status(response.execution_id).await.unwrap() {
            StatusDocument::Running(_) => {
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
            document => {
                finished = Some(document);
                break;
            }
        }
    }

    let document = finished.expect("execution did not settle");
    let StatusDocument::Finished(record) = document else {
        panic!("expected a finished record, got {:?}", document);
    };
    assert_eq!(record.execution_id, response.execution_id);
    assert_eq!(record.outputs.len(), 2);
    assert!(record.outputs.contains_key("initial_video"));
    assert!(record.outputs.contains_key("final_video"));
}

#[tokio::test(start_paused = true)]
async fn concurrent_executions_do_not_share_state() {
    let store = Arc::new(MemoryBlobStore::new());
    let pipeline = Pipeline::new(
        Arc::new(ScriptedTextGenerator::new(vec![
            // Two full runs: story + narration each. Later calls exhaust the
            // queue and fall back, which the story stage absorbs.
            Ok(test_utils::scripted_story()),
            Ok("First narration.".to_string()),
            Ok(test_utils::scripted_story()),
            Ok("Second narration.".to_string()),
        ])),
        Arc::new(StaticImageGenerator::new()),
        Arc::new(StaticSpeechSynthesizer::new()),
        Arc::new(FakeVideoJob::completing("job-cc", 1, store.clone())),
        Arc::new(FakeMergeJob::completing("merge-cc", 1)),
        store,
        test_config(),
    );
    let service = ExecutionService::new(pipeline);

    let first = service.start("topic one").await.unwrap();
    let second = service.start("topic two").await.unwrap();
    assert_ne!(first.execution_id, second.execution_id);

    for response in [first, second] {
        let mut settled = false;
        for _ in 0..200 {
            match service.status(response.execution_id).await.unwrap() {
                StatusDocument::Running(_) => {
                    tokio::time::sleep(Duration::from_secs(1)).await;
                }
                StatusDocument::Finished(record) => {
                    assert_eq!(record.execution_id, response.execution_id);
                    settled = true;
                    break;
                }
                StatusDocument::Failed(failure) => {
                    panic!("execution failed: {}", failure.error);
                }
            }
        }
        assert!(settled, "execution did not settle");
    }
}
