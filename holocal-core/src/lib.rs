//! Calendar events stored behind zome calls.
//!
//! This crate turns the `calendar_events` zome into typed calendar data and
//! drives a calendar widget with it:
//! - `timestamp` and `mapper` convert between wire entries and [`CalendarEvent`]s
//! - `zome` defines the remote call surface and its transports
//! - `service` is the gateway to the store
//! - `form` and `controller` run the load → select → create → reload cycle

pub mod cell;
pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod form;
pub mod mapper;
pub mod service;
pub mod timestamp;
pub mod zome;

pub use cell::{AgentPubKey, CellId, DnaHash};
pub use controller::{
    BlockAnchor, CalendarController, CalendarSurface, CalendarView, ControllerState, CreationMenu,
};
pub use error::{CalendarError, CalendarResult};
pub use event::{CalendarEvent, EntryHash, EventDraft, HashedRecord, TimeRange};
pub use form::CreationForm;
pub use mapper::RenderableEvent;
pub use service::EventService;
pub use timestamp::RemoteTimestamp;
