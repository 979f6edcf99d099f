use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::{collections::VecDeque, fmt};

use crate::display::{format_ms, format_timestamp};

/// Maximum number of entries kept; the oldest is evicted past this
pub const SESSION_LOG_CAPACITY: usize = 20;

/// Summary of one pause or natural completion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    timestamp: DateTime<Local>,
    elapsed_ms: u64,
    planned_ms: u64,
}

impl LogEntry {
    /// Stamped with the current local time, truncated to the minute
    pub fn new(elapsed_ms: u64, planned_ms: u64) -> Self {
        Self::with_timestamp(Local::now(), elapsed_ms, planned_ms)
    }

    pub fn with_timestamp(timestamp: DateTime<Local>, elapsed_ms: u64, planned_ms: u64) -> Self {
        Self {
            timestamp: truncate_to_minute(timestamp),
            elapsed_ms,
            planned_ms,
        }
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn planned_ms(&self) -> u64 {
        self.planned_ms
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed_ms >= self.planned_ms
    }
}

/// `<timestamp> — <elapsed MM:SS> / <planned MM:SS>`
impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} — {} / {}",
            format_timestamp(&self.timestamp),
            format_ms(self.elapsed_ms),
            format_ms(self.planned_ms)
        )
    }
}

fn truncate_to_minute(ts: DateTime<Local>) -> DateTime<Local> {
    use chrono::Timelike;
    ts.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(ts)
}

/// Newest-first, append-only history of sessions
#[derive(Debug, Clone, Default)]
pub struct SessionLog {
    entries: VecDeque<LogEntry>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(SESSION_LOG_CAPACITY + 1),
        }
    }

    pub fn append(&mut self, entry: LogEntry) {
        self.entries.push_front(entry);
        if self.entries.len() > SESSION_LOG_CAPACITY {
            self.entries.pop_back();
        }
    }

    /// Newest first
    pub fn entries(&self) -> impl ExactSizeIterator<Item = &LogEntry> + DoubleEndedIterator + '_ {
        self.entries.iter()
    }

    pub fn get(&self, index: usize) -> Option<&LogEntry> {
        self.entries.get(index)
    }

    pub fn newest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
