//! Progress banner record.

#[cfg(test)]
#[path = "progress_test.rs"]
mod progress_test;

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressStatus {
    #[default]
    Idle,
    Running,
    Completed,
    Error,
}

impl ProgressStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Error => "error",
        }
    }
}

/// Long-running backend activity shown as a banner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub id: String,
    pub title: String,
    /// Percentage in `0..=100`.
    #[serde(deserialize_with = "deserialize_clamped_progress")]
    pub progress: u8,
    pub status: ProgressStatus,
}

impl ProgressRecord {
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, progress: i64, status: ProgressStatus) -> Self {
        Self { id: id.into(), title: title.into(), progress: clamp_progress(progress), status }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status == ProgressStatus::Running
    }
}

/// Clamp an arbitrary integer into a percentage.
#[must_use]
pub fn clamp_progress(value: i64) -> u8 {
    u8::try_from(value.clamp(0, 100)).unwrap_or(100)
}

#[allow(clippy::cast_possible_truncation)]
fn deserialize_clamped_progress<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if raw.is_nan() {
        return Ok(0);
    }
    Ok(clamp_progress(raw.clamp(0.0, 100.0).round() as i64))
}
