//! Progress banner state and poll scheduling.

#[cfg(test)]
#[path = "progress_test.rs"]
mod progress_test;

use std::time::Duration;

use model::{ProgressRecord, ProgressStatus};

use crate::util::lifecycle::Lifetime;

#[derive(Clone, Debug, Default)]
pub struct ProgressState {
    pub record: Option<ProgressRecord>,
}

impl ProgressState {
    pub fn apply(&mut self, record: Option<ProgressRecord>) {
        self.record = record;
    }

    /// Absent or idle records take no layout space.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.record.as_ref().is_some_and(|r| r.status != ProgressStatus::Idle)
    }

    #[must_use]
    pub fn should_poll(&self) -> bool {
        self.record.as_ref().is_some_and(ProgressRecord::is_running)
    }

    /// Delay before the next fetch, or `None` when polling must stop.
    #[must_use]
    pub fn next_poll_delay(&self, lifetime: &Lifetime, interval: Duration) -> Option<Duration> {
        (lifetime.is_alive() && self.should_poll()).then_some(interval)
    }

    /// Delay after a failed fetch. The shown record is kept, so a running
    /// record keeps being polled; nothing was ever shown means stop.
    #[must_use]
    pub fn next_poll_delay_after_error(&self, lifetime: &Lifetime, interval: Duration) -> Option<Duration> {
        self.next_poll_delay(lifetime, interval)
    }
}
