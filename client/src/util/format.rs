//! Display formatting for sizes, clock times, dates, and relative ages.
//!
//! Clock times and dates take the UTC offset as a parameter so they stay
//! testable; `clock::local_offset_ms` supplies it in the browser.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use model::Timestamp;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

use crate::util::clock;

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// `0 Bytes`, else base-1024 with up to two decimals.
#[allow(clippy::cast_precision_loss)]
pub fn file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_owned();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let fixed = format!("{value:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", SIZE_UNITS[unit])
}

/// `hh:mm AM/PM` in local time.
pub fn clock_time(ts: Timestamp) -> String {
    clock_time_at_offset(ts, clock::local_offset_ms(ts))
}

/// `M/D/YYYY` in local time.
pub fn short_date(ts: Timestamp) -> String {
    short_date_at_offset(ts, clock::local_offset_ms(ts))
}

pub fn clock_time_at_offset(ts: Timestamp, offset_ms: Timestamp) -> String {
    local_datetime(ts, offset_ms)
        .and_then(|dt| dt.format(format_description!("[hour repr:12]:[minute] [period]")).ok())
        .unwrap_or_default()
}

pub fn short_date_at_offset(ts: Timestamp, offset_ms: Timestamp) -> String {
    local_datetime(ts, offset_ms)
        .and_then(|dt| dt.format(format_description!("[month padding:none]/[day padding:none]/[year]")).ok())
        .unwrap_or_default()
}

/// `ts` shifted into a fixed UTC offset. `None` when either is out of range.
fn local_datetime(ts: Timestamp, offset_ms: Timestamp) -> Option<OffsetDateTime> {
    let offset = UtcOffset::from_whole_seconds(i32::try_from(offset_ms / 1000).ok()?).ok()?;
    let utc = OffsetDateTime::from_unix_timestamp_nanos(i128::from(ts) * 1_000_000).ok()?;
    Some(utc.to_offset(offset))
}

/// "just now", "N minutes ago", "N hours ago", "N days ago".
#[allow(clippy::cast_precision_loss)]
pub fn relative_time(then: Timestamp, now: Timestamp) -> String {
    let minutes = round_half_up((then - now) as f64 / 60_000.0);
    if minutes > -1 {
        return "just now".to_owned();
    }
    if minutes > -60 {
        return ago(-minutes, "minute");
    }
    let hours = round_half_up(minutes as f64 / 60.0);
    if hours > -24 {
        return ago(-hours, "hour");
    }
    ago(-round_half_up(hours as f64 / 24.0), "day")
}

fn ago(n: i64, unit: &str) -> String {
    if n == 1 { format!("1 {unit} ago") } else { format!("{n} {unit}s ago") }
}

#[allow(clippy::cast_possible_truncation)]
fn round_half_up(x: f64) -> i64 {
    (x + 0.5).floor() as i64
}
