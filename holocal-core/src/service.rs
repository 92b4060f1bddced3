//! The calendar events service: the only gateway to the store.
//!
//! Each operation is exactly one zome call. Nothing is retried or cached, and
//! transport errors are passed through untouched.

use tracing::debug;

use crate::cell::CellId;
use crate::error::{CalendarError, CalendarResult};
use crate::event::{CalendarEvent, EntryHash, EventDraft, HashedRecord};
use crate::mapper::{decode, encode_draft};
use crate::zome::protocol::{
    CreateCalendarEvent, DEFAULT_ZOME_NAME, GetCalendarEvent, GetMyCalendarEvents, RawHashedEntry,
    ZomeFunction,
};
use crate::zome::{ZomeCall, ZomeTransport};

pub struct EventService<T> {
    transport: T,
    cell_id: CellId,
    zome_name: String,
}

impl<T: ZomeTransport> EventService<T> {
    pub fn new(transport: T, cell_id: CellId) -> Self {
        Self::with_zome_name(transport, cell_id, DEFAULT_ZOME_NAME)
    }

    pub fn with_zome_name(transport: T, cell_id: CellId, zome_name: impl Into<String>) -> Self {
        EventService {
            transport,
            cell_id,
            zome_name: zome_name.into(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn cell_id(&self) -> &CellId {
        &self.cell_id
    }

    pub fn zome_name(&self) -> &str {
        &self.zome_name
    }

    /// All events of the calling agent, in the order the store returns them.
    pub async fn list_my_events(&self) -> CalendarResult<Vec<HashedRecord<CalendarEvent>>> {
        let entries = self.call(GetMyCalendarEvents).await?;
        entries.into_iter().map(hashed_event).collect()
    }

    /// Create an event. The returned hash is the one the store assigned.
    pub async fn create_event(&self, draft: EventDraft) -> CalendarResult<HashedRecord<CalendarEvent>> {
        let created = self.call(CreateCalendarEvent(encode_draft(&draft))).await?;
        hashed_event(created)
    }

    /// Fetch one event. The store does not echo the hash, so `hash` is attached as given.
    pub async fn get_event(&self, hash: &EntryHash) -> CalendarResult<HashedRecord<CalendarEvent>> {
        let entry = self.call(GetCalendarEvent(hash.clone())).await?;
        Ok(HashedRecord::new(hash.clone(), decode(&entry)?))
    }

    /// Call a typed zome function and decode its result shape.
    async fn call<F: ZomeFunction>(&self, function: F) -> CalendarResult<F::Output> {
        let payload = serde_json::to_value(&function)
            .map_err(|e| CalendarError::Serialization(e.to_string()))?;

        let call = ZomeCall {
            cell_id: self.cell_id.clone(),
            zome_name: self.zome_name.clone(),
            fn_name: F::fn_name().to_string(),
            payload,
            provenance: self.cell_id.agent_pub_key().clone(),
            cap_secret: None,
        };

        debug!(zome = %self.zome_name, fn_name = F::fn_name(), "zome call");
        let result = self.transport.call_zome(call).await?;

        serde_json::from_value(result).map_err(|e| {
            CalendarError::MalformedRecord(format!("{} result: {}", F::fn_name(), e))
        })
    }
}

fn hashed_event(raw: RawHashedEntry) -> CalendarResult<HashedRecord<CalendarEvent>> {
    Ok(HashedRecord::new(raw.entry_hash, decode(&raw.entry)?))
}
