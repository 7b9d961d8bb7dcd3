//! Progress service: current activity record and its simulator.

use model::{ProgressRecord, ProgressStatus};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::info;

use crate::state::AppState;

pub async fn current(state: &AppState) -> Option<ProgressRecord> {
    state.store.read().await.progress.clone()
}

/// Step a running record forward by `step` points, completing it at 100.
/// Returns whether the record changed.
pub fn step(record: &mut ProgressRecord, step: u8) -> bool {
    if !record.is_running() {
        return false;
    }
    record.progress = record.progress.saturating_add(step).min(100);
    if record.progress == 100 {
        record.status = ProgressStatus::Completed;
    }
    true
}

/// Spawn the background simulator. It stops itself once nothing is running.
pub fn spawn_progress_simulator(state: AppState) -> JoinHandle<()> {
    let tick = state.config.progress_tick;
    let amount = state.config.progress_step;
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let mut store = state.store.write().await;
            let Some(record) = store.progress.as_mut() else { break };
            if !step(record, amount) {
                break;
            }
            if record.status == ProgressStatus::Completed {
                info!(id = %record.id, title = %record.title, "progress: activity completed");
            }
        }
        info!("progress simulator stopped");
    })
}

#[cfg(test)]
#[path = "progress_test.rs"]
mod tests;
