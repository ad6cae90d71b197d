//! Story stage tests: scene coercion, fallback behavior, persistence.

mod test_utils;

use std::collections::BTreeMap;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use storyreel_core::{StoryMetadata, SCENE_COUNT};
use storyreel_error::{GenerationError, GenerationErrorKind, StoryreelErrorKind};
use storyreel_pipeline::StoryStage;
use storyreel_storage::{layout, BlobStore, MemoryBlobStore};
use test_utils::{scripted_story, test_config, ScriptedTextGenerator, StaticImageGenerator};

fn stage_with(
    text: ScriptedTextGenerator,
    images: StaticImageGenerator,
) -> (StoryStage, Arc<MemoryBlobStore>) {
    let store = Arc::new(MemoryBlobStore::new());
    let stage = StoryStage::new(
        Arc::new(text),
        Arc::new(images),
        store.clone(),
        test_config(),
    );
    (stage, store)
}

fn raw_story_with_scenes(count: usize) -> String {
    (1..=count)
        .map(|n| format!("Scene {}: Wide shot - beat number {}", n, n))
        .collect::<Vec<_>>()
        .join("\n")
}

#[tokio::test]
async fn empty_topic_is_a_validation_error() {
    let (stage, _) = stage_with(
        ScriptedTextGenerator::story_and_narration(),
        StaticImageGenerator::new(),
    );

    let result = stage.generate("   ").await;
    assert!(matches!(
        result.unwrap_err().kind(),
        StoryreelErrorKind::Validation(_)
    ));
}

#[tokio::test]
async fn always_exactly_five_scenes_regardless_of_model_output() {
    for raw_count in [0usize, 3, 5, 8] {
        let responses = vec![
            Ok(raw_story_with_scenes(raw_count)),
            Ok("A narration.".to_string()),
        ];
        let (stage, _) = stage_with(
            ScriptedTextGenerator::new(responses),
            StaticImageGenerator::failing(),
        );

        let record = stage.generate("a day at the beach").await.unwrap();
        assert_eq!(
            record.scenes.len(),
            SCENE_COUNT,
            "{} raw scenes must coerce to {}",
            raw_count,
            SCENE_COUNT
        );
        assert!(record.scenes.iter().all(|s| !s.trim().is_empty()));
    }
}

#[tokio::test]
async fn generator_failure_degrades_to_synthetic_scenes() {
    let responses = vec![
        Err(GenerationError::new(GenerationErrorKind::TextGeneration(
            "model offline".to_string(),
        ))
        .into()),
        // Narration call also fails (queue exhausted) -> stock narration
    ];
    let (stage, _) = stage_with(
        ScriptedTextGenerator::new(responses),
        StaticImageGenerator::failing(),
    );

    let record = stage.generate("robots").await.unwrap();
    assert_eq!(record.scenes.len(), SCENE_COUNT);
    assert_eq!(record.scenes[0], "Scene 1 about robots");
    assert_eq!(record.narration, "A story unfolds across five scenes.");
}

#[tokio::test]
async fn story_id_embeds_sanitized_topic() {
    let (stage, _) = stage_with(
        ScriptedTextGenerator::story_and_narration(),
        StaticImageGenerator::failing(),
    );

    let record = stage.generate("A day at the beach").await.unwrap();
    assert!(record.story_id.as_str().contains("_a_day_at_the_beach_"));
}

#[tokio::test]
async fn scenes_and_metadata_are_persisted() {
    let (stage, store) = stage_with(
        ScriptedTextGenerator::story_and_narration(),
        StaticImageGenerator::new(),
    );

    let record = stage.generate("a day at the beach").await.unwrap();

    let raw = store
        .get(&layout::scenes_json("src", &record.story_id))
        .await
        .unwrap();
    let manifest: BTreeMap<String, String> = serde_json::from_slice(&raw).unwrap();
    assert_eq!(manifest.len(), SCENE_COUNT);
    for n in 1..=SCENE_COUNT {
        assert!(manifest.contains_key(&format!("shot{}_text", n)));
    }

    let raw = store
        .get(&layout::metadata_json("src", &record.story_id))
        .await
        .unwrap();
    let metadata: StoryMetadata = serde_json::from_slice(&raw).unwrap();
    assert_eq!(metadata.story_id, record.story_id);
    assert_eq!(metadata.scene_count, SCENE_COUNT);
    assert_eq!(metadata.generated_images, SCENE_COUNT);
    assert_eq!(metadata.image_locations.len(), SCENE_COUNT);
}

#[tokio::test]
async fn scene_images_are_stored_per_shot() {
    let (stage, store) = stage_with(
        ScriptedTextGenerator::story_and_narration(),
        StaticImageGenerator::new(),
    );

    let record = stage.generate("a day at the beach").await.unwrap();
    for n in 1..=SCENE_COUNT {
        assert!(
            store
                .exists(&layout::scene_image("src", &record.story_id, n))
                .await
                .unwrap(),
            "scene_{}.png missing",
            n
        );
    }
}

#[tokio::test]
async fn image_failures_skip_scenes_without_failing_the_stage() {
    let images = StaticImageGenerator::failing();
    let (stage, store) = stage_with(ScriptedTextGenerator::story_and_narration(), images);

    let record = stage.generate("a day at the beach").await.unwrap();

    // No images landed, but the stage still succeeded and committed the
    // scenes and metadata.
    for n in 1..=SCENE_COUNT {
        assert!(
            !store
                .exists(&layout::scene_image("src", &record.story_id, n))
                .await
                .unwrap()
        );
    }
    let raw = store
        .get(&layout::metadata_json("src", &record.story_id))
        .await
        .unwrap();
    let metadata: StoryMetadata = serde_json::from_slice(&raw).unwrap();
    assert_eq!(metadata.generated_images, 0);
}

#[tokio::test]
async fn narration_comes_from_the_second_model_call() {
    let text = ScriptedTextGenerator::new(vec![
        Ok(scripted_story()),
        Ok("  A voice-over script.  ".to_string()),
    ]);
    let (stage, _) = stage_with(text, StaticImageGenerator::failing());

    let record = stage.generate("a day at the beach").await.unwrap();
    assert_eq!(record.narration, "A voice-over script.");
    assert_eq!(record.full_text, scripted_story());
}

#[tokio::test]
async fn one_image_call_per_scene() {
    let images = Arc::new(StaticImageGenerator::new());
    let stage = StoryStage::new(
        Arc::new(ScriptedTextGenerator::story_and_narration()),
        images.clone(),
        Arc::new(MemoryBlobStore::new()),
        test_config(),
    );

    stage.generate("a day at the beach").await.unwrap();
    assert_eq!(images.calls.load(Ordering::SeqCst), SCENE_COUNT as u32);
}
