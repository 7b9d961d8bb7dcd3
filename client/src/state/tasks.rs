//! Task panel state: list, live update application, and display partition.
//!
//! DESIGN
//! ======
//! Updates replace the task with the same id, subject to the status state
//! machine: forward moves (including skips) apply, regressions are rejected
//! and leave the task unchanged. `completedAt` is set on entry into
//! `completed`, kept once set, and dropped from any non-completed task.

#[cfg(test)]
#[path = "tasks_test.rs"]
mod tasks_test;

use std::collections::HashMap;

use model::{TaskStatus, Timestamp, TodoTask};

use crate::config::UnknownTaskPolicy;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskUpdateOutcome {
    Replaced,
    Inserted,
    IgnoredUnknown,
    RejectedRegression { from: TaskStatus, to: TaskStatus },
}

#[derive(Clone, Debug, Default)]
pub struct TasksState {
    pub tasks: Vec<TodoTask>,
    /// View-only disclosure for the completed group.
    pub show_completed: bool,
}

impl TasksState {
    /// Replace the list with a fetched one. Also used to catch up after a
    /// reconnect, so completion stamps already shown are kept.
    pub fn load(&mut self, tasks: Vec<TodoTask>, now: Timestamp) {
        let stamps: HashMap<String, Timestamp> = self
            .tasks
            .iter()
            .filter(|t| t.is_completed())
            .filter_map(|t| Some((t.id.clone(), t.completed_at?)))
            .collect();
        self.tasks = tasks
            .into_iter()
            .map(|t| {
                let previous = stamps.get(&t.id).copied();
                normalize_completion(t, previous, now)
            })
            .collect();
    }

    pub fn apply_update(&mut self, incoming: TodoTask, policy: UnknownTaskPolicy, now: Timestamp) -> TaskUpdateOutcome {
        let Some(index) = self.tasks.iter().position(|t| t.id == incoming.id) else {
            return match policy {
                UnknownTaskPolicy::Ignore => TaskUpdateOutcome::IgnoredUnknown,
                UnknownTaskPolicy::Insert => {
                    self.tasks.push(normalize_completion(incoming, None, now));
                    TaskUpdateOutcome::Inserted
                }
            };
        };

        let existing = &mut self.tasks[index];
        if !existing.status.can_transition_to(incoming.status) {
            return TaskUpdateOutcome::RejectedRegression { from: existing.status, to: incoming.status };
        }
        let previous = existing.completed_at.filter(|_| existing.is_completed());
        *existing = normalize_completion(incoming, previous, now);
        TaskUpdateOutcome::Replaced
    }

    /// Tasks not yet completed, in list order.
    #[must_use]
    pub fn active(&self) -> Vec<TodoTask> {
        self.tasks.iter().filter(|t| !t.is_completed()).cloned().collect()
    }

    #[must_use]
    pub fn completed(&self) -> Vec<TodoTask> {
        self.tasks.iter().filter(|t| t.is_completed()).cloned().collect()
    }

    #[must_use]
    pub fn completed_label(&self) -> String {
        format!("Completed ({})", self.tasks.iter().filter(|t| t.is_completed()).count())
    }

    pub fn toggle_completed(&mut self) {
        self.show_completed = !self.show_completed;
    }
}

/// Enforce the completion-stamp rules on a task about to be stored.
///
/// A completed task keeps `previous` if it was already completed, else uses
/// its own stamp, else `now`; the stamp never precedes `created_at`.
fn normalize_completion(mut task: TodoTask, previous: Option<Timestamp>, now: Timestamp) -> TodoTask {
    if task.status == TaskStatus::Completed {
        let stamp = previous.or(task.completed_at).unwrap_or(now);
        task.completed_at = Some(stamp.max(task.created_at));
    } else {
        task.completed_at = None;
    }
    task
}
