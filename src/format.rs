//! Human-readable sizes and timestamps for display.

use chrono::Utc;

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
const SECONDS_PER_DAY: i64 = 86_400;

/// Formats a byte count with the largest fitting binary unit.
///
/// `0` → `"0 B"`, `1024` → `"1 KB"`, `1536` → `"1.5 KB"`. Values keep at most
/// two decimals with trailing zeros dropped. Anything past TB stays in TB.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut unit = 0;
    let mut divisor: u64 = 1;
    while unit + 1 < SIZE_UNITS.len() && bytes / divisor >= 1024 {
        divisor *= 1024;
        unit += 1;
    }

    let value = bytes as f64 / divisor as f64;
    format!("{} {}", trim_decimals(value), SIZE_UNITS[unit])
}

/// Rounds to two decimals and drops trailing zeros (`1.50` → `1.5`, `2.00` → `2`).
fn trim_decimals(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Describes how long ago `epoch_seconds` was, relative to now.
pub fn format_relative_time(epoch_seconds: i64) -> String {
    format_relative_time_at(epoch_seconds, Utc::now().timestamp())
}

/// Same as [`format_relative_time`] with an explicit current time.
///
/// Whole days only: 0 → `Today`, 1 → `Yesterday`, 2–6 → `N days ago`,
/// 7–29 → `N weeks ago`, 30 and up → `N months ago` (30-day months).
/// Timestamps in the future count as today.
pub fn format_relative_time_at(epoch_seconds: i64, now: i64) -> String {
    let days = (now.saturating_sub(epoch_seconds) / SECONDS_PER_DAY).max(0);
    match days {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => format!("{} days ago", days),
        7..=29 => format!("{} weeks ago", days / 7),
        _ => format!("{} months ago", days / 30),
    }
}

/// Relative time for an optional manifest timestamp.
pub fn format_last_updated(epoch_seconds: Option<i64>) -> String {
    match epoch_seconds {
        Some(ts) if ts > 0 => format_relative_time(ts),
        _ => "Unknown".to_string(),
    }
}
