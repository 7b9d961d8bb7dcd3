use super::*;
use crate::state::{Store, test_helpers};
use tokio::time::timeout;

fn task(id: &str, status: TaskStatus, created_at: Timestamp) -> TodoTask {
    let mut task = TodoTask::new(id, format!("task {id}"), created_at);
    task.status = status;
    if status == TaskStatus::Completed {
        task.completed_at = Some(created_at);
    }
    task
}

#[test]
fn in_progress_completes_on_low_roll_and_stamps_completion() {
    let mut t = task("1", TaskStatus::InProgress, 100);
    assert!(advance(&mut t, 0.1, 500));
    assert_eq!(t.status, TaskStatus::Completed);
    assert_eq!(t.completed_at, Some(500));
}

#[test]
fn in_progress_stays_on_high_roll() {
    let mut t = task("1", TaskStatus::InProgress, 100);
    assert!(!advance(&mut t, 0.3, 500));
    assert_eq!(t.status, TaskStatus::InProgress);
    assert!(t.completed_at.is_none());
}

#[test]
fn pending_starts_on_low_roll() {
    let mut t = task("1", TaskStatus::Pending, 100);
    assert!(advance(&mut t, 0.19, 500));
    assert_eq!(t.status, TaskStatus::InProgress);
    assert!(t.completed_at.is_none());
    let mut t = task("2", TaskStatus::Pending, 100);
    assert!(!advance(&mut t, 0.2, 500));
}

#[test]
fn terminal_tasks_never_move() {
    for status in [TaskStatus::Completed, TaskStatus::Failed] {
        let mut t = task("1", status, 100);
        let before = t.clone();
        assert!(!advance(&mut t, 0.0, 500));
        assert_eq!(t, before);
    }
}

#[test]
fn completion_stamp_never_precedes_creation() {
    let mut t = task("1", TaskStatus::InProgress, 1_000);
    assert!(advance(&mut t, 0.0, 10));
    assert_eq!(t.completed_at, Some(1_000));
    assert!(t.is_consistent());
}

#[test]
fn advance_all_draws_one_roll_per_task_and_returns_changes() {
    let mut tasks = vec![
        task("1", TaskStatus::InProgress, 0),
        task("2", TaskStatus::Pending, 0),
        task("3", TaskStatus::Pending, 0),
    ];
    let mut rolls = vec![0.0, 0.9, 0.0].into_iter();
    let changed = advance_all(&mut tasks, || rolls.next().unwrap_or(1.0), 50);
    let ids: Vec<_> = changed.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "3"]);
    assert_eq!(tasks[1].status, TaskStatus::Pending);
    assert!(rolls.next().is_none());
}

#[tokio::test]
async fn list_is_oldest_first() {
    let store = Store { tasks: vec![task("b", TaskStatus::Pending, 20), task("a", TaskStatus::Pending, 10)], ..Store::default() };
    let state = test_helpers::test_app_state_with_store(store);
    let ids: Vec<_> = list(&state).await.into_iter().map(|t| t.id).collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[tokio::test]
async fn simulate_tick_broadcasts_every_change() {
    let store = Store { tasks: (0..50).map(|i| task(&i.to_string(), TaskStatus::InProgress, 0)).collect(), ..Store::default() };
    let state = test_helpers::test_app_state_with_store(store);
    let mut rx = state.task_updates.subscribe();

    let changed = simulate_tick(&state).await;
    for expected in &changed {
        let got = timeout(Duration::from_millis(200), rx.recv())
            .await
            .expect("update receive timed out")
            .expect("channel closed");
        assert_eq!(&got, expected);
        assert_eq!(got.status, TaskStatus::Completed);
    }
    let stored = list(&state).await;
    assert_eq!(stored.iter().filter(|t| t.is_completed()).count(), changed.len());
    assert!(stored.iter().all(TodoTask::is_consistent));
}
