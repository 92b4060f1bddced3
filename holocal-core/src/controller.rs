//! The calendar controller: load, select, create, reload.
//!
//! ```text
//! Idle ──start──▶ Loading ──events fetched──▶ Loaded ──select──▶ AwaitingCreation
//!                    ▲                          ▲                     │  │
//!                    │                          └──────dismiss────────┘  │
//!                    └──────────────────created (full reload)────────────┘
//! ```
//!
//! The widget and the popup menu are reached through [`CalendarSurface`] and
//! [`CreationMenu`]. The store stays the source of truth: after a creation the
//! whole event set is fetched again instead of inserting the new record.

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::error::{CalendarError, CalendarResult};
use crate::event::{CalendarEvent, HashedRecord, TimeRange};
use crate::form::CreationForm;
use crate::mapper::{RenderableEvent, to_renderable};
use crate::service::EventService;
use crate::zome::ZomeTransport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    Loading,
    Loaded,
    AwaitingCreation,
}

impl fmt::Display for ControllerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ControllerState::Idle => "idle",
            ControllerState::Loading => "loading",
            ControllerState::Loaded => "loaded",
            ControllerState::AwaitingCreation => "awaiting creation",
        };
        f.write_str(s)
    }
}

/// Initial view of the calendar widget (`initial-view`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CalendarView {
    #[serde(rename = "dayGridMonth")]
    DayGridMonth,
    #[default]
    #[serde(rename = "timeGridWeek")]
    TimeGridWeek,
    #[serde(rename = "timeGridDay")]
    TimeGridDay,
}

impl CalendarView {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalendarView::DayGridMonth => "dayGridMonth",
            CalendarView::TimeGridWeek => "timeGridWeek",
            CalendarView::TimeGridDay => "timeGridDay",
        }
    }
}

impl fmt::Display for CalendarView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalendarView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dayGridMonth" | "month" => Ok(CalendarView::DayGridMonth),
            "timeGridWeek" | "week" => Ok(CalendarView::TimeGridWeek),
            "timeGridDay" | "day" => Ok(CalendarView::TimeGridDay),
            other => Err(format!(
                "Unknown view '{other}'. Expected dayGridMonth, timeGridWeek or timeGridDay"
            )),
        }
    }
}

/// Position of a rendered block the creation menu can attach to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockAnchor(pub String);

/// The calendar rendering widget.
pub trait CalendarSurface: Send + Sync {
    fn remove_all_event_sources(&self);
    fn add_event_source(&self, events: Vec<RenderableEvent>);
    fn render(&self);
    /// The block of the selection currently being drafted, if the widget shows one.
    fn drafted_block(&self) -> Option<BlockAnchor>;
    /// Toggle the widget's loading indicator.
    fn show_loading(&self, _loading: bool) {}
}

/// The popup holding the creation form.
#[async_trait]
pub trait CreationMenu: Send + Sync {
    fn is_open(&self) -> bool;
    fn open(&self, anchor: Option<BlockAnchor>);
    /// Resolves once the menu has acknowledged it is closed.
    async fn close(&self);
}

struct ControllerInner {
    state: ControllerState,
    events: Option<Vec<HashedRecord<CalendarEvent>>>,
}

pub struct CalendarController<T, S, M> {
    service: Arc<EventService<T>>,
    surface: S,
    menu: M,
    form: tokio::sync::Mutex<CreationForm<T>>,
    view: CalendarView,
    inner: Mutex<ControllerInner>,
    // Serializes installing a load's results; never held with `inner`
    install: Mutex<()>,
}

impl<T, S, M> CalendarController<T, S, M>
where
    T: ZomeTransport,
    S: CalendarSurface,
    M: CreationMenu,
{
    pub fn new(service: Arc<EventService<T>>, surface: S, menu: M, view: CalendarView) -> Self {
        let form = CreationForm::new(Arc::clone(&service));
        CalendarController {
            service,
            surface,
            menu,
            form: tokio::sync::Mutex::new(form),
            view,
            inner: Mutex::new(ControllerInner {
                state: ControllerState::Idle,
                events: None,
            }),
            install: Mutex::new(()),
        }
    }

    pub fn view(&self) -> CalendarView {
        self.view
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn menu(&self) -> &M {
        &self.menu
    }

    pub fn service(&self) -> &Arc<EventService<T>> {
        &self.service
    }

    pub fn state(&self) -> ControllerState {
        self.inner().state
    }

    /// Events from the last completed load, `None` while none has completed
    /// since the last reload began.
    pub fn events(&self) -> Option<Vec<HashedRecord<CalendarEvent>>> {
        self.inner().events.clone()
    }

    /// The range the creation form is currently drafting.
    pub async fn pending_range(&self) -> Option<TimeRange> {
        self.form.lock().await.initial_range()
    }

    /// Receive every event created through the controller's form.
    pub async fn subscribe_created(&self) -> broadcast::Receiver<HashedRecord<CalendarEvent>> {
        self.form.lock().await.subscribe()
    }

    /// First render: draw the empty calendar, then load the events.
    pub async fn start(&self) -> CalendarResult<()> {
        self.require(&[ControllerState::Idle], "start")?;
        debug!(view = %self.view, "starting calendar");
        self.surface.render();
        self.load_calendar_events().await
    }

    /// Fetch all events and replace the widget's event set.
    ///
    /// A failed fetch leaves the controller in `Loading` and the widget
    /// showing whatever it showed before. Overlapping loads are not guarded:
    /// whichever resolves last wins.
    pub async fn load_calendar_events(&self) -> CalendarResult<()> {
        {
            let mut inner = self.inner();
            inner.state = ControllerState::Loading;
            inner.events = None;
        }
        debug!("loading calendar events");
        self.surface.show_loading(true);

        let records = self.service.list_my_events().await?;
        let renderable = records.iter().map(to_renderable).collect();

        // `inner` stays unlocked while the surface runs
        let _install = self.install.lock().unwrap_or_else(PoisonError::into_inner);
        self.surface.remove_all_event_sources();
        self.surface.add_event_source(renderable);
        self.surface.show_loading(false);
        self.surface.render();

        debug!(count = records.len(), "calendar events loaded");
        let mut inner = self.inner();
        inner.events = Some(records);
        if inner.state == ControllerState::Loading {
            inner.state = ControllerState::Loaded;
        }
        Ok(())
    }

    /// React to a time-range selection by opening the creation form next to
    /// the drafted block. An already open menu is closed first, and the new
    /// anchor is read only after it acknowledges.
    pub async fn select(&self, range: TimeRange) -> CalendarResult<()> {
        self.require(
            &[ControllerState::Loaded, ControllerState::AwaitingCreation],
            "select a time range",
        )?;

        if self.menu.is_open() {
            debug!("closing open creation menu before re-anchoring");
            self.menu.close().await;
        }

        let anchor = self.surface.drafted_block();
        {
            let mut form = self.form.lock().await;
            form.reset();
            form.set_initial_range(range);
        }
        self.menu.open(anchor);

        self.inner().state = ControllerState::AwaitingCreation;
        debug!(%range, "creation form opened");
        Ok(())
    }

    /// Submit the open form with `title`, close the menu and reload everything.
    pub async fn submit_creation(
        &self,
        title: impl Into<String>,
    ) -> CalendarResult<HashedRecord<CalendarEvent>> {
        self.require(&[ControllerState::AwaitingCreation], "create an event")?;

        let created = {
            let mut form = self.form.lock().await;
            form.set_title(title);
            form.submit().await?
        };

        self.menu.close().await;
        self.load_calendar_events().await?;
        Ok(created)
    }

    /// Close the creation menu without creating anything.
    pub async fn dismiss_creation(&self) {
        if self.state() != ControllerState::AwaitingCreation {
            return;
        }
        self.menu.close().await;

        let mut inner = self.inner();
        if inner.state == ControllerState::AwaitingCreation {
            inner.state = ControllerState::Loaded;
        }
    }

    fn require(&self, allowed: &[ControllerState], action: &'static str) -> CalendarResult<()> {
        let state = self.state();
        if allowed.contains(&state) {
            Ok(())
        } else {
            warn!(%state, action, "rejected controller transition");
            Err(CalendarError::InvalidTransition { state, action })
        }
    }

    fn inner(&self) -> MutexGuard<'_, ControllerInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
