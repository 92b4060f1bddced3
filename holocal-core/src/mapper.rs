//! Conversion between zome entries, [`CalendarEvent`]s and the shape the
//! calendar widget renders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{CalendarError, CalendarResult};
use crate::event::{CalendarEvent, EntryHash, EventDraft, HashedRecord};
use crate::timestamp::{from_wire, to_wire};
use crate::zome::protocol::CalendarEventEntry;

/// An event as the calendar widget consumes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderableEvent {
    pub id: EntryHash,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Decode a raw entry into a [`CalendarEvent`].
///
/// Scalar fields are copied verbatim and the two timestamps go through the
/// time codec. Unknown fields are ignored. A missing required field is a
/// [`CalendarError::MalformedRecord`], an undecodable timestamp a
/// [`CalendarError::Decode`].
pub fn decode(raw: &serde_json::Value) -> CalendarResult<CalendarEvent> {
    let entry: CalendarEventEntry = serde_json::from_value(raw.clone())
        .map_err(|e| CalendarError::MalformedRecord(e.to_string()))?;
    decode_entry(entry)
}

pub fn decode_entry(entry: CalendarEventEntry) -> CalendarResult<CalendarEvent> {
    Ok(CalendarEvent {
        start_time: from_wire(&entry.start_time)?,
        end_time: from_wire(&entry.end_time)?,
        title: entry.title,
        location: entry.location,
        invitees: entry.invitees,
    })
}

/// Encode a draft as the create payload.
pub fn encode_draft(draft: &EventDraft) -> CalendarEventEntry {
    CalendarEventEntry {
        title: draft.title.clone(),
        start_time: to_wire(draft.start_time),
        end_time: to_wire(draft.end_time),
        location: draft.location.clone(),
        invitees: draft.invitees.clone(),
    }
}

/// Shape a hashed event for the calendar widget. The hash becomes the id.
///
/// Instants beyond the widget's date range are pinned to its first or last
/// representable instant.
pub fn to_renderable(hashed: &HashedRecord<CalendarEvent>) -> RenderableEvent {
    let event = &hashed.content;
    RenderableEvent {
        id: hashed.hash.clone(),
        title: event.title.clone(),
        start: to_datetime(event.start_time),
        end: to_datetime(event.end_time),
    }
}

fn to_datetime(ms: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(ms).unwrap_or_else(|| {
        warn!(ms, "instant outside the renderable date range, clamping");
        if ms < 0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_copies_scalars_and_converts_times() {
        let raw = json!({
            "title": "Planning",
            "startTime": [1_700_000_000i64, 500_000_000],
            "endTime": [1_700_003_600i64, 0],
            "location": "Room 4",
            "invitees": ["uhCAkbob", "uhCAkcarol"],
        });

        let event = decode(&raw).unwrap();
        assert_eq!(event.title, "Planning");
        assert_eq!(event.start_time, 1_700_000_000_500);
        assert_eq!(event.end_time, 1_700_003_600_000);
        assert_eq!(event.location.as_deref(), Some("Room 4"));
        assert_eq!(event.invitees, vec!["uhCAkbob", "uhCAkcarol"]);
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let raw = json!({
            "title": "Planning",
            "startTime": [0, 0],
            "endTime": [60, 0],
            "invitees": [],
            "colour": "teal",
        });

        let event = decode(&raw).unwrap();
        assert_eq!(event.location, None);
        assert_eq!(event.end_time, 60_000);
    }

    #[test]
    fn test_decode_missing_title_is_malformed() {
        let raw = json!({
            "startTime": [0, 0],
            "endTime": [60, 0],
            "invitees": [],
        });

        let err = decode(&raw).unwrap_err();
        assert!(matches!(err, CalendarError::MalformedRecord(_)));
    }

    #[test]
    fn test_decode_sub_millisecond_timestamp_fails() {
        let raw = json!({
            "title": "Planning",
            "startTime": [0, 1],
            "endTime": [60, 0],
            "invitees": [],
        });

        let err = decode(&raw).unwrap_err();
        assert!(matches!(err, CalendarError::Decode(_)));
    }

    #[test]
    fn test_decode_out_of_domain_wire_values_fail_as_decode_errors() {
        for (start, end) in [(json!([0, -1]), json!([60, 0])), (json!([1e20, 0]), json!([60, 0]))] {
            let raw = json!({
                "title": "Planning",
                "startTime": start,
                "endTime": end,
                "invitees": [],
            });

            let err = decode(&raw).unwrap_err();
            assert!(matches!(err, CalendarError::Decode(_)), "got {err:?}");
        }
    }

    #[test]
    fn test_draft_encodes_through_codec() {
        let draft = EventDraft {
            title: "Standup".into(),
            start_time: 1_700_000_000_000,
            end_time: 1_700_003_600_000,
            location: None,
            invitees: vec![],
        };

        let entry = encode_draft(&draft);
        assert_eq!(entry.start_time, to_wire(draft.start_time));
        assert_eq!(entry.end_time, to_wire(draft.end_time));
        assert_eq!(decode_entry(entry).unwrap().start_time, draft.start_time);
    }

    #[test]
    fn test_to_renderable_uses_hash_as_id() {
        let hashed = HashedRecord::new(
            EntryHash::from("uhCEkstandup"),
            CalendarEvent {
                title: "Standup".into(),
                start_time: 1_700_000_000_000,
                end_time: 1_700_003_600_000,
                location: None,
                invitees: vec![],
            },
        );

        let renderable = to_renderable(&hashed);
        assert_eq!(renderable.id, hashed.hash);
        assert_eq!(renderable.title, "Standup");
        assert_eq!(renderable.start.to_rfc3339(), "2023-11-14T22:13:20+00:00");
        assert_eq!(renderable.end.timestamp_millis(), 1_700_003_600_000);
    }

    #[test]
    fn test_to_renderable_clamps_far_instants() {
        let hashed = HashedRecord::new(
            EntryHash::from("uhCEkfar"),
            CalendarEvent {
                title: "Far".into(),
                start_time: -9_000_000_000_000_000,
                end_time: 9_000_000_000_000_000,
                location: None,
                invitees: vec![],
            },
        );

        let renderable = to_renderable(&hashed);
        assert_eq!(renderable.start, DateTime::<Utc>::MIN_UTC);
        assert_eq!(renderable.end, DateTime::<Utc>::MAX_UTC);
    }
}
