//! Text rendering for durations and session log lines.

use chrono::{DateTime, TimeZone};

/// `YYYY-MM-DD HH:mm`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Render milliseconds as `MM:SS`, truncating partial seconds. Negative input
/// is shown as `00:00`.
pub fn format_mmss(millis: i64) -> String {
    let total_secs = millis.max(0) / 1000;
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

/// Unsigned convenience over [`format_mmss`]
pub fn format_ms(millis: u64) -> String {
    format_mmss(i64::try_from(millis).unwrap_or(i64::MAX))
}

pub fn format_timestamp<Tz: TimeZone>(ts: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    ts.format(TIMESTAMP_FORMAT).to_string()
}
