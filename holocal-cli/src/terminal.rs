//! Terminal implementations of the calendar widget and the creation menu.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{Datelike, Duration, Local, NaiveDate};
use holocal_core::{
    BlockAnchor, CalendarSurface, CalendarView, CreationMenu, RenderableEvent, TimeRange,
};
use owo_colors::OwoColorize;

use crate::render::render_agenda;

/// Dates shown by `view` around `focus`, inclusive.
pub fn visible_window(view: CalendarView, focus: NaiveDate) -> (NaiveDate, NaiveDate) {
    match view {
        CalendarView::TimeGridDay => (focus, focus),
        CalendarView::TimeGridWeek => {
            let monday = focus - Duration::days(focus.weekday().num_days_from_monday() as i64);
            (monday, monday + Duration::days(6))
        }
        CalendarView::DayGridMonth => {
            let first = focus.with_day(1).unwrap_or(focus);
            let next_month = if first.month() == 12 {
                NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
            } else {
                NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
            };
            let last = next_month.map(|d| d - Duration::days(1)).unwrap_or(first);
            (first, last)
        }
    }
}

struct SurfaceState {
    sources: Vec<Vec<RenderableEvent>>,
    installed: bool,
    draft: Option<TimeRange>,
    focus: NaiveDate,
}

/// Prints the visible part of the calendar as an agenda.
pub struct TerminalSurface {
    view: CalendarView,
    state: Mutex<SurfaceState>,
    quiet: AtomicBool,
}

impl TerminalSurface {
    pub fn new(view: CalendarView) -> Self {
        Self::focused_on(view, Local::now().date_naive())
    }

    /// A surface showing the period of `view` that contains `focus`.
    pub fn focused_on(view: CalendarView, focus: NaiveDate) -> Self {
        TerminalSurface {
            view,
            state: Mutex::new(SurfaceState {
                sources: vec![],
                installed: false,
                draft: None,
                focus,
            }),
            quiet: AtomicBool::new(false),
        }
    }

    /// Stop (or resume) drawing on render.
    pub fn set_quiet(&self, quiet: bool) {
        self.quiet.store(quiet, Ordering::Relaxed);
    }

    /// Show the selection `range` as the block being drafted.
    pub fn begin_draft(&self, range: TimeRange) {
        self.state().draft = Some(range);
    }

    /// What a render would draw right now.
    fn agenda(&self) -> Option<String> {
        let state = self.state();
        // Nothing to draw before the first load lands
        if !state.installed || self.quiet.load(Ordering::Relaxed) {
            return None;
        }

        let (from, to) = visible_window(self.view, state.focus);
        let events: Vec<RenderableEvent> = state.sources.iter().flatten().cloned().collect();

        Some(format!(
            "{} {} – {}\n{}",
            "📅".bold(),
            from.format("%a %b %-d"),
            to.format("%a %b %-d %Y"),
            render_agenda(&events, Some((from, to)))
        ))
    }

    fn state(&self) -> std::sync::MutexGuard<'_, SurfaceState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CalendarSurface for TerminalSurface {
    fn remove_all_event_sources(&self) {
        let mut state = self.state();
        state.sources.clear();
        state.draft = None;
    }

    fn add_event_source(&self, events: Vec<RenderableEvent>) {
        let mut state = self.state();
        state.sources.push(events);
        state.installed = true;
    }

    fn render(&self) {
        if let Some(agenda) = self.agenda() {
            println!("{agenda}");
        }
    }

    fn show_loading(&self, loading: bool) {
        if loading && !self.quiet.load(Ordering::Relaxed) {
            eprintln!("{}", "Loading…".dimmed());
        }
    }

    fn drafted_block(&self) -> Option<BlockAnchor> {
        self.state()
            .draft
            .map(|range| BlockAnchor(range.to_string()))
    }
}

/// Announces the creation popup on the terminal.
#[derive(Default)]
pub struct TerminalMenu {
    open: Mutex<bool>,
}

#[async_trait]
impl CreationMenu for TerminalMenu {
    fn is_open(&self) -> bool {
        *self.open.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn open(&self, anchor: Option<BlockAnchor>) {
        *self.open.lock().unwrap_or_else(PoisonError::into_inner) = true;
        match anchor {
            Some(BlockAnchor(label)) => println!("{} {}", "New event".dimmed(), label.cyan()),
            None => println!("{}", "New event".dimmed()),
        }
    }

    async fn close(&self) {
        *self.open.lock().unwrap_or_else(PoisonError::into_inner) = false;
    }
}
