//! Tasks and their one-directional status machine.
//!
//! DESIGN
//! ======
//! `pending -> in_progress -> completed`, with `failed` reachable from
//! `pending` and `in_progress`. `completed` and `failed` are terminal.
//! Forward skips are legal (a missed `in_progress` event must not wedge a
//! task); anything that moves backwards, or out of a terminal state, is not.

#[cfg(test)]
#[path = "tasks_test.rs"]
mod tasks_test;

use serde::{Deserialize, Serialize};

use crate::Timestamp;

/// Error returned by [`TodoTask::transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("illegal task transition {from:?} -> {to:?}")]
pub struct TransitionError {
    pub from: TaskStatus,
    pub to: TaskStatus,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl TaskStatus {
    fn rank(self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::InProgress => 1,
            Self::Completed | Self::Failed => 2,
        }
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Whether moving from `self` to `next` keeps the status monotonic.
    /// Staying in place is always allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        if self == next {
            return true;
        }
        !self.is_terminal() && next.rank() > self.rank()
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// A unit of backend work shown in the task list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoTask {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TaskStatus,
    pub created_at: Timestamp,
    /// Set exactly when the task enters `completed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl TodoTask {
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, created_at: Timestamp) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            status: TaskStatus::Pending,
            created_at,
            completed_at: None,
            priority: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// Move to `next`, stamping `completed_at` on entry into `completed`.
    ///
    /// Returns `Ok(true)` if the status changed and `Ok(false)` if it was
    /// already `next`. The completion stamp is clamped so it never precedes
    /// `created_at`.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError`] if the move would regress the status.
    pub fn transition(&mut self, next: TaskStatus, now: Timestamp) -> Result<bool, TransitionError> {
        if !self.status.can_transition_to(next) {
            return Err(TransitionError { from: self.status, to: next });
        }
        if self.status == next {
            return Ok(false);
        }
        self.status = next;
        if next == TaskStatus::Completed {
            self.completed_at = Some(now.max(self.created_at));
        }
        Ok(true)
    }

    /// True when `completed_at` is present iff completed and never precedes
    /// `created_at`.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        match self.completed_at {
            Some(done) => self.is_completed() && done >= self.created_at,
            None => !self.is_completed(),
        }
    }
}
