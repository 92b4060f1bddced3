//! Typed zome functions of the `calendar_events` zome, and the JSON envelope
//! used between holocal and conductor bridge binaries over stdin/stdout.

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::event::EntryHash;
use crate::timestamp::RemoteTimestamp;

/// Zome name used when none is configured.
pub const DEFAULT_ZOME_NAME: &str = "calendar_events";

/// A zome function: its fixed name, its payload (the implementing type) and
/// its result shape.
pub trait ZomeFunction: Serialize {
    type Output: DeserializeOwned;
    fn fn_name() -> &'static str;
}

/// A calendar event entry as stored by the zome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEventEntry {
    pub title: String,
    pub start_time: RemoteTimestamp,
    pub end_time: RemoteTimestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub invitees: Vec<String>,
}

/// An entry together with its hash, as returned by list and create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawHashedEntry {
    pub entry_hash: EntryHash,
    pub entry: serde_json::Value,
}

/// Enumerate the calling agent's events. Takes no payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct GetMyCalendarEvents;

impl ZomeFunction for GetMyCalendarEvents {
    type Output = Vec<RawHashedEntry>;
    fn fn_name() -> &'static str {
        "get_my_calendar_events"
    }
}

/// Create an event entry.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateCalendarEvent(pub CalendarEventEntry);

impl ZomeFunction for CreateCalendarEvent {
    type Output = RawHashedEntry;
    fn fn_name() -> &'static str {
        "create_calendar_event"
    }
}

/// Fetch one entry by hash. The result does not echo the hash back.
#[derive(Debug, Serialize, Deserialize)]
pub struct GetCalendarEvent(pub EntryHash);

impl ZomeFunction for GetCalendarEvent {
    type Output = serde_json::Value;
    fn fn_name() -> &'static str {
        "get_calendar_event"
    }
}

/// Response sent from a conductor bridge back to holocal.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response<T> {
    Success { data: T },
    Error { error: String },
}

impl<T: Serialize> Response<T> {
    pub fn success(data: T) -> String {
        serde_json::to_string(&Response::Success { data })
            .unwrap_or_else(|e| Response::error(&format!("Failed to serialize response: {e}")))
    }
}

impl Response<()> {
    pub fn error(msg: &str) -> String {
        serde_json::json!({ "status": "error", "error": msg }).to_string()
    }
}
