//! Server configuration parsed from environment variables.
//!
//! Every knob has a default so the server starts with no environment at all.
//! Unparseable values fall back to the default rather than aborting startup.

use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_REPLY_DELAY_MS: u64 = 2000;
pub const DEFAULT_TASK_TICK_SECS: u64 = 5;
pub const DEFAULT_PROGRESS_TICK_MS: u64 = 2000;
pub const DEFAULT_PROGRESS_STEP: u8 = 5;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Simulated assistant thinking time before a chat reply.
    pub reply_delay: Duration,
    /// Interval between task simulator passes.
    pub task_tick: Duration,
    /// Interval between progress simulator steps.
    pub progress_tick: Duration,
    /// Percentage points added per progress step.
    pub progress_step: u8,
    pub max_upload_bytes: usize,
    /// Seed the in-memory store with demo chat/files/tasks/progress.
    pub seed_fixtures: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            reply_delay: Duration::from_millis(DEFAULT_REPLY_DELAY_MS),
            task_tick: Duration::from_secs(DEFAULT_TASK_TICK_SECS),
            progress_tick: Duration::from_millis(DEFAULT_PROGRESS_TICK_MS),
            progress_step: DEFAULT_PROGRESS_STEP,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            seed_fixtures: true,
        }
    }
}

impl ServerConfig {
    /// Build config from the process environment.
    ///
    /// - `PORT`: default 3000
    /// - `SI_MAPPER_REPLY_DELAY_MS`: default 2000
    /// - `SI_MAPPER_TASK_TICK_SECS`: default 5
    /// - `SI_MAPPER_PROGRESS_TICK_MS`: default 2000
    /// - `SI_MAPPER_PROGRESS_STEP`: default 5
    /// - `SI_MAPPER_MAX_UPLOAD_BYTES`: default 25 MiB
    /// - `SI_MAPPER_SEED_FIXTURES`: default `true`
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let parse_or = |key: &str, default: u64| -> u64 {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .unwrap_or(default)
        };

        let port = lookup("PORT")
            .and_then(|v| v.trim().parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let progress_step = lookup("SI_MAPPER_PROGRESS_STEP")
            .and_then(|v| v.trim().parse::<u8>().ok())
            .filter(|step| (1..=100).contains(step))
            .unwrap_or(DEFAULT_PROGRESS_STEP);
        let max_upload_bytes = lookup("SI_MAPPER_MAX_UPLOAD_BYTES")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);
        let seed_fixtures = lookup("SI_MAPPER_SEED_FIXTURES").map_or(true, |v| parse_bool(&v).unwrap_or(true));

        Self {
            port,
            reply_delay: Duration::from_millis(parse_or("SI_MAPPER_REPLY_DELAY_MS", DEFAULT_REPLY_DELAY_MS)),
            task_tick: Duration::from_secs(parse_or("SI_MAPPER_TASK_TICK_SECS", DEFAULT_TASK_TICK_SECS).max(1)),
            progress_tick: Duration::from_millis(parse_or("SI_MAPPER_PROGRESS_TICK_MS", DEFAULT_PROGRESS_TICK_MS).max(1)),
            progress_step,
            max_upload_bytes,
            seed_fixtures,
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
