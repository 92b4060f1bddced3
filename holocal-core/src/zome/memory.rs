//! An in-process conductor implementing the `calendar_events` zome.
//!
//! Entries are content-addressed: the hash is derived from the entry's JSON,
//! so identical content always gets the identical hash. [`ConductorStore`] is
//! plain data that can be persisted; [`MemoryConductor`] wraps it as a
//! [`ZomeTransport`].

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::cell::AgentPubKey;
use crate::error::{CalendarError, CalendarResult};
use crate::event::EntryHash;
use crate::zome::protocol::{
    CalendarEventEntry, CreateCalendarEvent, DEFAULT_ZOME_NAME, GetCalendarEvent,
    GetMyCalendarEvents, RawHashedEntry, ZomeFunction,
};
use crate::zome::{ZomeCall, ZomeTransport};

const ENTRY_HASH_PREFIX: &str = "uhCEk";

/// Content hash of an entry.
pub fn entry_hash(entry: &CalendarEventEntry) -> CalendarResult<EntryHash> {
    let bytes =
        serde_json::to_vec(entry).map_err(|e| CalendarError::Serialization(e.to_string()))?;
    let digest = Sha256::digest(&bytes);
    Ok(EntryHash(format!(
        "{ENTRY_HASH_PREFIX}{}",
        URL_SAFE_NO_PAD.encode(digest)
    )))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredEntry {
    hash: EntryHash,
    author: AgentPubKey,
    entry: CalendarEventEntry,
}

/// Entries of one DNA, in creation order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConductorStore {
    entries: Vec<StoredEntry>,
}

impl ConductorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Execute one zome call against the store.
    pub fn dispatch(&mut self, call: &ZomeCall) -> CalendarResult<serde_json::Value> {
        if call.zome_name != DEFAULT_ZOME_NAME {
            return Err(CalendarError::Transport(format!(
                "Zome '{}' not found",
                call.zome_name
            )));
        }

        let fn_name = call.fn_name.as_str();
        if fn_name == GetMyCalendarEvents::fn_name() {
            to_json(self.my_events(&call.provenance))
        } else if fn_name == CreateCalendarEvent::fn_name() {
            let entry: CalendarEventEntry = parse_payload(&call.payload)?;
            to_json(self.create(&call.provenance, entry)?)
        } else if fn_name == GetCalendarEvent::fn_name() {
            let hash: EntryHash = parse_payload(&call.payload)?;
            to_json(self.get(&hash)?)
        } else {
            Err(CalendarError::Transport(format!(
                "Function '{fn_name}' not found in zome '{}'",
                call.zome_name
            )))
        }
    }

    fn my_events(&self, author: &AgentPubKey) -> Vec<RawHashedEntry> {
        self.entries
            .iter()
            .filter(|stored| &stored.author == author)
            .filter_map(|stored| {
                serde_json::to_value(&stored.entry)
                    .ok()
                    .map(|entry| RawHashedEntry {
                        entry_hash: stored.hash.clone(),
                        entry,
                    })
            })
            .collect()
    }

    fn create(
        &mut self,
        author: &AgentPubKey,
        entry: CalendarEventEntry,
    ) -> CalendarResult<RawHashedEntry> {
        let hash = entry_hash(&entry)?;
        let exists = self
            .entries
            .iter()
            .any(|stored| stored.hash == hash && &stored.author == author);

        if !exists {
            self.entries.push(StoredEntry {
                hash: hash.clone(),
                author: author.clone(),
                entry: entry.clone(),
            });
        }

        Ok(RawHashedEntry {
            entry_hash: hash,
            entry: serde_json::to_value(&entry)
                .map_err(|e| CalendarError::Serialization(e.to_string()))?,
        })
    }

    fn get(&self, hash: &EntryHash) -> CalendarResult<&CalendarEventEntry> {
        self.entries
            .iter()
            .find(|stored| &stored.hash == hash)
            .map(|stored| &stored.entry)
            .ok_or_else(|| CalendarError::Transport(format!("Entry {hash} not found")))
    }
}

fn parse_payload<T: serde::de::DeserializeOwned>(payload: &serde_json::Value) -> CalendarResult<T> {
    serde_json::from_value(payload.clone())
        .map_err(|e| CalendarError::Transport(format!("Invalid payload: {e}")))
}

fn to_json<T: Serialize>(value: T) -> CalendarResult<serde_json::Value> {
    serde_json::to_value(value).map_err(|e| CalendarError::Serialization(e.to_string()))
}

/// A [`ConductorStore`] served in-process.
#[derive(Debug, Default)]
pub struct MemoryConductor {
    store: Mutex<ConductorStore>,
}

impl MemoryConductor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry_count(&self) -> usize {
        self.store.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

#[async_trait]
impl ZomeTransport for MemoryConductor {
    async fn call_zome(&self, call: ZomeCall) -> CalendarResult<serde_json::Value> {
        debug!(fn_name = %call.fn_name, "memory conductor call");
        self.store
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .dispatch(&call)
    }
}
