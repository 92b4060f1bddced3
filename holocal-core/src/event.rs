//! Calendar event types as seen by the UI layer.
//!
//! All instants are milliseconds since the Unix epoch. The wire shape lives in
//! [`crate::zome::protocol`] and is converted by [`crate::mapper`].

use std::fmt;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// Content hash assigned by the store to an entry. Opaque to this crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryHash(pub String);

impl EntryHash {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntryHash {
    fn from(s: &str) -> Self {
        EntryHash(s.to_string())
    }
}

/// A content record paired with the hash the store gave it.
///
/// Treated as an immutable value: a reload replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HashedRecord<T> {
    pub hash: EntryHash,
    pub content: T,
}

impl<T> HashedRecord<T> {
    pub fn new(hash: EntryHash, content: T) -> Self {
        HashedRecord { hash, content }
    }
}

/// A calendar event.
///
/// `start_time <= end_time` is assumed by renderers but not checked here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub title: String,
    pub start_time: i64,
    pub end_time: i64,
    pub location: Option<String>,
    pub invitees: Vec<String>,
}

impl CalendarEvent {
    pub fn time_range(&self) -> TimeRange {
        TimeRange {
            start: self.start_time,
            end: self.end_time,
        }
    }
}

impl fmt::Display for CalendarEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.title.is_empty() {
            write!(f, "(untitled)")
        } else {
            write!(f, "{}", self.title)
        }
    }
}

/// Input for creating an event. The store assigns the hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub start_time: i64,
    pub end_time: i64,
    pub location: Option<String>,
    pub invitees: Vec<String>,
}

impl EventDraft {
    /// A draft for `range` with no location and no invitees.
    pub fn new(title: impl Into<String>, range: TimeRange) -> Self {
        EventDraft {
            title: title.into(),
            start_time: range.start,
            end_time: range.end,
            location: None,
            invitees: vec![],
        }
    }
}

/// A selected interval, in epoch milliseconds, end exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: i64,
    pub end: i64,
}

impl TimeRange {
    pub fn new(start: i64, end: i64) -> Self {
        TimeRange { start, end }
    }

    pub fn from_datetimes(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        TimeRange {
            start: start.timestamp_millis(),
            end: end.timestamp_millis(),
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fmt_ms = |ms: i64| match DateTime::<Utc>::from_timestamp_millis(ms) {
            Some(dt) => dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
            None => ms.to_string(),
        };
        write!(f, "{} → {}", fmt_ms(self.start), fmt_ms(self.end))
    }
}
