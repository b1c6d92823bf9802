//! Save/load round trips through the stores

use std::time::Duration;

use serde_json::json;
use timer_assistant::{
    services::{JsonFileStore, MemoryStore, Recorder, TimerStore, STORAGE_KEY},
    Assistant, TimerManager, TimerState,
};
use tokio::time::sleep;

/// tea running, eggs paused, done finished, idle stopped
async fn populated_manager() -> TimerManager {
    let recorder = Recorder::new();
    let manager = TimerManager::new(recorder.services());
    manager.create_timer("tea", 120).unwrap();
    manager.create_timer("eggs", 300).unwrap();
    manager.pause_timer("eggs").unwrap();
    manager.create_timer("done", 2).unwrap();
    manager.create_timer("idle", 60).unwrap();
    manager.stop_timer("idle").unwrap();

    sleep(Duration::from_millis(2500)).await;
    manager
}

#[tokio::test(start_paused = true)]
async fn round_trip_preserves_records_and_resumes_only_running() {
    let first_run = populated_manager().await;
    let store = MemoryStore::new();
    first_run.save(&store).await.unwrap();
    let saved = first_run.snapshot();

    let recorder = Recorder::new();
    let restored = TimerManager::new(recorder.services());
    assert_eq!(restored.load(&store).await.unwrap(), 4);

    for (name, before) in &saved {
        let after = restored.get(name).unwrap();
        assert_eq!(after.duration, before.duration, "{name}");
        assert_eq!(after.remaining, before.remaining, "{name}");
        assert_eq!(after.paused, before.paused, "{name}");
        assert_eq!(after.alerting, before.alerting, "{name}");
    }

    assert_eq!(restored.state_of("tea"), Some(TimerState::Running));
    assert_eq!(restored.state_of("eggs"), Some(TimerState::Paused));
    assert_eq!(restored.state_of("done"), Some(TimerState::Completed));
    assert_eq!(restored.state_of("idle"), Some(TimerState::Idle));
    assert_eq!(recorder.lines(), vec!["[tea]: 1m"]);
    assert_eq!(recorder.scheduled().len(), 1);

    drop(first_run);
    sleep(Duration::from_millis(2500)).await;

    assert_eq!(restored.get("tea").unwrap().remaining, saved["tea"].remaining - 2);
    assert_eq!(restored.get("eggs").unwrap().remaining, saved["eggs"].remaining);
    assert_eq!(restored.get("idle").unwrap().remaining, 60);
}

#[tokio::test(start_paused = true)]
async fn restored_paused_timer_ticks_after_resume() {
    let store = MemoryStore::new();
    store
        .set(
            STORAGE_KEY,
            json!({
                "eggs": {
                    "name": "eggs", "duration": 300, "remaining": 200,
                    "running": true, "paused": true, "alerting": false
                }
            }),
        )
        .await
        .unwrap();

    let recorder = Recorder::new();
    let manager = TimerManager::new(recorder.services());
    manager.load(&store).await.unwrap();
    assert!(recorder.scheduled().is_empty());

    manager.resume_timer("eggs").unwrap();
    sleep(Duration::from_millis(2500)).await;

    assert_eq!(manager.get("eggs").unwrap().remaining, 198);
    assert_eq!(recorder.scheduled(), vec![("eggs".to_string(), 260.0 / 60.0)]);
}

#[tokio::test(start_paused = true)]
async fn load_without_saved_timers_is_empty() {
    let manager = TimerManager::new(Recorder::new().services());
    assert_eq!(manager.load(&MemoryStore::new()).await.unwrap(), 0);
    assert!(manager.is_empty());
}

#[tokio::test(start_paused = true)]
async fn malformed_saved_timers_are_an_error() {
    let store = MemoryStore::new();
    store.set(STORAGE_KEY, json!({"tea": {"name": "tea"}})).await.unwrap();

    let manager = TimerManager::new(Recorder::new().services());
    assert!(manager.load(&store).await.is_err());
    assert!(manager.is_empty());
}

#[tokio::test]
async fn assistant_restores_from_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("timers.json");

    {
        let assistant = Assistant::new(Recorder::new().services(), JsonFileStore::new(&path));
        assistant.handle_text("set a 5 minute timer for coffee break").await;
        assistant.handle_text("hold coffee break").await;
        assistant.shutdown().await;
    }

    let saved: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved[STORAGE_KEY]["coffee break"]["paused"], true);

    let recorder = Recorder::new();
    let assistant = Assistant::new(recorder.services(), JsonFileStore::new(&path));
    assert_eq!(assistant.restore().await, 1);
    assert_eq!(assistant.manager().state_of("coffee break"), Some(TimerState::Paused));
    assistant.manager().stop_all();
}
