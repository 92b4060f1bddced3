use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use holocal_core::config::HolocalConfig;
use holocal_core::{CalendarController, TimeRange};
use owo_colors::OwoColorize;

use crate::render::Render;
use crate::terminal::{TerminalMenu, TerminalSurface};

pub async fn run(title: String, start: &str, end: &str) -> Result<()> {
    let start = parse_datetime(start).context("Invalid --start")?;
    let end = parse_datetime(end).context("Invalid --end")?;
    let range = TimeRange::from_datetimes(start, end);

    let config = HolocalConfig::load()?;
    let view = config.initial_view;
    let service = Arc::new(super::connect(&config));

    let surface = TerminalSurface::focused_on(view, start.with_timezone(&Local).date_naive());
    let controller = CalendarController::new(service, surface, TerminalMenu::default(), view);

    // Only the calendar after the creation is shown
    controller.surface().set_quiet(true);
    controller.start().await?;

    controller.surface().begin_draft(range);
    controller.select(range).await?;
    controller.surface().set_quiet(false);
    let created = controller.submit_creation(title).await?;

    println!("{} {}", "Created".green(), created.render());
    Ok(())
}

/// Parse RFC 3339, or a local "YYYY-MM-DDTHH:MM" / "YYYY-MM-DD HH:MM".
fn parse_datetime(s: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M"))
        .with_context(|| format!("'{s}' is not a date/time. Expected e.g. 2025-03-20T15:00"))?;

    let local = Local
        .from_local_datetime(&naive)
        .earliest()
        .with_context(|| format!("'{s}' does not exist in the local timezone"))?;

    Ok(local.with_timezone(&Utc))
}
