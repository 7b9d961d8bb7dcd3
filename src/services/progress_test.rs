use super::*;
use crate::config::ServerConfig;
use crate::services::chat::EchoResponder;
use crate::state::{Store, test_helpers};
use std::sync::Arc;
use std::time::Duration;

fn running(progress: i64) -> ProgressRecord {
    ProgressRecord::new("1", "Processing files...", progress, ProgressStatus::Running)
}

#[test]
fn step_adds_points_while_running() {
    let mut record = running(65);
    assert!(step(&mut record, 5));
    assert_eq!(record.progress, 70);
    assert!(record.is_running());
}

#[test]
fn step_completes_at_one_hundred() {
    let mut record = running(98);
    assert!(step(&mut record, 5));
    assert_eq!(record.progress, 100);
    assert_eq!(record.status, ProgressStatus::Completed);
}

#[test]
fn step_ignores_non_running_records() {
    for status in [ProgressStatus::Idle, ProgressStatus::Completed, ProgressStatus::Error] {
        let mut record = ProgressRecord::new("1", "x", 40, status);
        assert!(!step(&mut record, 5));
        assert_eq!(record.progress, 40);
    }
}

#[tokio::test]
async fn current_reflects_store() {
    let state = test_helpers::test_app_state();
    assert!(current(&state).await.is_none());
    let state = test_helpers::test_app_state_with_store(Store { progress: Some(running(10)), ..Store::default() });
    assert_eq!(current(&state).await.map(|p| p.progress), Some(10));
}

#[tokio::test]
async fn simulator_runs_to_completion_and_stops() {
    let config = ServerConfig {
        progress_tick: Duration::from_millis(5),
        progress_step: 50,
        seed_fixtures: false,
        ..ServerConfig::default()
    };
    let state = AppState::with_store(config, Arc::new(EchoResponder), Store { progress: Some(running(10)), ..Store::default() });
    let handle = spawn_progress_simulator(state.clone());
    tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .expect("simulator should stop")
        .expect("simulator task panicked");
    let record = current(&state).await.expect("record");
    assert_eq!(record.progress, 100);
    assert_eq!(record.status, ProgressStatus::Completed);
}
