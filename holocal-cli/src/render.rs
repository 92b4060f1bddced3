//! Terminal rendering for holocal types.

use chrono::{DateTime, Local, NaiveDate, Utc};
use holocal_core::{CalendarEvent, HashedRecord, RenderableEvent, TimeRange};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for HashedRecord<CalendarEvent> {
    fn render(&self) -> String {
        let event = &self.content;
        let mut line = format!(
            "{} {} {}",
            event.to_string().bold(),
            event.time_range().render(),
            self.hash.to_string().dimmed()
        );
        if let Some(location) = &event.location {
            line.push_str(&format!("\n   {} {}", "at".dimmed(), location));
        }
        if !event.invitees.is_empty() {
            line.push_str(&format!(
                "\n   {} {}",
                "with".dimmed(),
                event.invitees.join(", ")
            ));
        }
        line
    }
}

impl Render for TimeRange {
    fn render(&self) -> String {
        self.to_string().cyan().to_string()
    }
}

/// Render events grouped by day, restricted to `window` (inclusive dates) if given.
pub fn render_agenda(events: &[RenderableEvent], window: Option<(NaiveDate, NaiveDate)>) -> String {
    let mut visible: Vec<&RenderableEvent> = events
        .iter()
        .filter(|e| match window {
            Some((from, to)) => {
                let day = local_date(&e.start);
                day >= from && day <= to
            }
            None => true,
        })
        .collect();
    visible.sort_by_key(|e| e.start);

    if visible.is_empty() {
        return "No events found".dimmed().to_string();
    }

    let mut lines = Vec::new();
    let mut current_date: Option<String> = None;

    for event in visible {
        let date_label = format_date_label(&event.start);

        if current_date.as_ref() != Some(&date_label) {
            if current_date.is_some() {
                lines.push(String::new());
            }
            lines.push(date_label.bold().to_string());
            current_date = Some(date_label);
        }

        let title = if event.title.is_empty() {
            "(untitled)"
        } else {
            event.title.as_str()
        };
        lines.push(format!(
            "  {}–{} {}",
            format_time(&event.start),
            format_time(&event.end),
            title
        ));
    }

    lines.join("\n")
}

fn local_date(dt: &DateTime<Utc>) -> NaiveDate {
    dt.with_timezone(&Local).date_naive()
}

/// Format a date as a human-readable label (e.g. "Today", "Tomorrow", "Wed Feb 25")
fn format_date_label(dt: &DateTime<Utc>) -> String {
    let today = Local::now().date_naive();
    let date = local_date(dt);

    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%a %b %-d %Y").to_string(),
    }
}

fn format_time(dt: &DateTime<Utc>) -> String {
    dt.with_timezone(&Local).format("%H:%M").to_string()
}

/// Simple pluralization helper
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holocal_core::EntryHash;

    fn renderable(id: &str, title: &str, start_ms: i64) -> RenderableEvent {
        RenderableEvent {
            id: EntryHash::from(id),
            title: title.to_string(),
            start: DateTime::<Utc>::from_timestamp_millis(start_ms).unwrap(),
            end: DateTime::<Utc>::from_timestamp_millis(start_ms + 3_600_000).unwrap(),
        }
    }

    #[test]
    fn test_agenda_sorts_and_filters_by_window() {
        let events = vec![
            renderable("uhCEkb", "Later", 1_700_100_000_000),
            renderable("uhCEka", "Sooner", 1_700_000_000_000),
            renderable("uhCEkc", "Far away", 1_800_000_000_000),
        ];
        let from = local_date(&events[1].start);
        let to = local_date(&events[0].start);

        let agenda = render_agenda(&events, Some((from, to)));
        let sooner = agenda.find("Sooner").unwrap();
        let later = agenda.find("Later").unwrap();
        assert!(sooner < later);
        assert!(!agenda.contains("Far away"));
    }

    #[test]
    fn test_empty_agenda() {
        assert!(render_agenda(&[], None).contains("No events found"));
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("event", 1), "event");
        assert_eq!(pluralize("event", 3), "events");
    }
}
