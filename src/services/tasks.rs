//! Task service: listing and the background status simulator.
//!
//! DESIGN
//! ======
//! Each simulator pass rolls once per task: an in-progress task completes
//! with probability 0.3 and a pending task starts with probability 0.2.
//! Statuses only move forward, and every change is broadcast on the task
//! update channel as the full task record.

use std::time::Duration;

use model::{TaskStatus, Timestamp, TodoTask};
use rand::Rng;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::state::{AppState, now_ms};

const COMPLETE_PROBABILITY: f64 = 0.3;
const START_PROBABILITY: f64 = 0.2;

/// All tasks, oldest first.
pub async fn list(state: &AppState) -> Vec<TodoTask> {
    let mut tasks = state.store.read().await.tasks.clone();
    tasks.sort_by_key(|t| t.created_at);
    tasks
}

/// Advance one task given a uniform roll in `[0, 1)`. Returns whether the
/// task changed.
pub fn advance(task: &mut TodoTask, roll: f64, now: Timestamp) -> bool {
    let next = match task.status {
        TaskStatus::InProgress if roll < COMPLETE_PROBABILITY => TaskStatus::Completed,
        TaskStatus::Pending if roll < START_PROBABILITY => TaskStatus::InProgress,
        _ => return false,
    };
    task.transition(next, now).unwrap_or(false)
}

/// Advance every task, drawing one roll per task. Returns the changed tasks.
pub fn advance_all(tasks: &mut [TodoTask], mut roll: impl FnMut() -> f64, now: Timestamp) -> Vec<TodoTask> {
    tasks
        .iter_mut()
        .filter_map(|task| advance(task, roll(), now).then(|| task.clone()))
        .collect()
}

/// Run one simulator pass and broadcast what changed.
pub async fn simulate_tick(state: &AppState) -> Vec<TodoTask> {
    let changed = {
        let mut store = state.store.write().await;
        let mut rng = rand::rng();
        advance_all(&mut store.tasks, || rng.random::<f64>(), now_ms())
    };
    for task in &changed {
        debug!(id = %task.id, status = task.status.as_str(), "tasks: status advanced");
        let _ = state.task_updates.send(task.clone());
    }
    changed
}

/// Spawn the background simulator on the configured tick.
pub fn spawn_task_simulator(state: AppState) -> JoinHandle<()> {
    let tick: Duration = state.config.task_tick;
    info!(tick_ms = tick.as_millis(), "task simulator started");
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // First tick fires immediately; skip it so fresh state is visible.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            simulate_tick(&state).await;
        }
    })
}

#[cfg(test)]
#[path = "tasks_test.rs"]
mod tests;
