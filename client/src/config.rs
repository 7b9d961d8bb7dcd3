//! Client runtime configuration, provided to components through context.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

/// What to do with a task update whose id is not in the list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnknownTaskPolicy {
    /// Drop the update and log a diagnostic.
    #[default]
    Ignore,
    /// Append the task to the list.
    Insert,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Prefix prepended to every API path. Empty means same origin.
    pub api_base: String,
    pub request_timeout: Duration,
    pub progress_poll_interval: Duration,
    pub toast_duration: Duration,
    pub max_toasts: usize,
    pub unknown_task_policy: UnknownTaskPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            request_timeout: Duration::from_secs(15),
            progress_poll_interval: Duration::from_secs(2),
            toast_duration: Duration::from_secs(4),
            max_toasts: 3,
            unknown_task_policy: UnknownTaskPolicy::Ignore,
        }
    }
}

impl ClientConfig {
    /// Absolute-or-relative URL for an API path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_base.trim_end_matches('/'))
    }
}
