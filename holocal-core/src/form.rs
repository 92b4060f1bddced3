//! The event creation form.
//!
//! The time range is supplied by whoever opens the form and cannot be edited
//! here; the user only provides a title. A successful submit is announced on
//! the `event-created` channel.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::debug;

use crate::error::{CalendarError, CalendarResult};
use crate::event::{CalendarEvent, EventDraft, HashedRecord, TimeRange};
use crate::service::EventService;
use crate::zome::ZomeTransport;

const EVENT_CREATED_CAPACITY: usize = 16;

pub struct CreationForm<T> {
    service: Arc<EventService<T>>,
    initial_range: Option<TimeRange>,
    title: String,
    event_created: broadcast::Sender<HashedRecord<CalendarEvent>>,
}

impl<T: ZomeTransport> CreationForm<T> {
    pub fn new(service: Arc<EventService<T>>) -> Self {
        let (event_created, _) = broadcast::channel(EVENT_CREATED_CAPACITY);
        CreationForm {
            service,
            initial_range: None,
            title: String::new(),
            event_created,
        }
    }

    pub fn set_initial_range(&mut self, range: TimeRange) {
        self.initial_range = Some(range);
    }

    pub fn initial_range(&self) -> Option<TimeRange> {
        self.initial_range
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Clear the title field.
    pub fn reset(&mut self) {
        self.title.clear();
    }

    /// Receive every event created through this form.
    pub fn subscribe(&self) -> broadcast::Receiver<HashedRecord<CalendarEvent>> {
        self.event_created.subscribe()
    }

    /// Create the event with no location and no invitees. The title is sent
    /// as entered, even when empty.
    pub async fn submit(&self) -> CalendarResult<HashedRecord<CalendarEvent>> {
        let range = self.initial_range.ok_or(CalendarError::MissingTimeRange)?;

        let created = self
            .service
            .create_event(EventDraft::new(self.title.clone(), range))
            .await?;

        debug!(hash = %created.hash, "event created");
        // No subscribers is fine
        let _ = self.event_created.send(created.clone());

        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellId;
    use crate::zome::MemoryConductor;

    fn form() -> CreationForm<MemoryConductor> {
        let service = EventService::new(MemoryConductor::new(), CellId::new("uhC0kdna", "uhCAkalice"));
        CreationForm::new(Arc::new(service))
    }

    #[tokio::test]
    async fn test_submit_without_range_fails() {
        let mut form = form();
        form.set_title("Standup");

        let err = form.submit().await.unwrap_err();
        assert!(matches!(err, CalendarError::MissingTimeRange));
    }

    #[tokio::test]
    async fn test_submit_announces_created_event() {
        let mut form = form();
        let mut created_rx = form.subscribe();
        form.set_initial_range(TimeRange::new(1_700_000_000_000, 1_700_003_600_000));
        form.set_title("Standup");

        let created = form.submit().await.unwrap();
        assert_eq!(created.content.title, "Standup");
        assert_eq!(created.content.location, None);
        assert!(created.content.invitees.is_empty());

        let announced = created_rx.recv().await.unwrap();
        assert_eq!(announced, created);
    }

    #[tokio::test]
    async fn test_empty_title_is_forwarded() {
        let mut form = form();
        form.set_initial_range(TimeRange::new(0, 60_000));

        let created = form.submit().await.unwrap();
        assert_eq!(created.content.title, "");
    }

    #[test]
    fn test_reset_clears_title_only() {
        let mut form = form();
        form.set_initial_range(TimeRange::new(0, 60_000));
        form.set_title("Standup");

        form.reset();
        assert_eq!(form.title(), "");
        assert_eq!(form.initial_range(), Some(TimeRange::new(0, 60_000)));
    }
}
