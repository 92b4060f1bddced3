use std::sync::Arc;

use anyhow::Result;
use holocal_core::config::HolocalConfig;
use holocal_core::{CalendarController, CalendarView};

use crate::terminal::{TerminalMenu, TerminalSurface};

pub async fn run(view: Option<CalendarView>) -> Result<()> {
    let config = HolocalConfig::load()?;
    let view = view.unwrap_or(config.initial_view);
    let service = Arc::new(super::connect(&config));

    let controller = CalendarController::new(
        service,
        TerminalSurface::new(view),
        TerminalMenu::default(),
        view,
    );

    // The surface prints the agenda once the events are installed
    controller.start().await?;
    Ok(())
}
