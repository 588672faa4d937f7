//! In-memory event publisher.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::ports::EventPublisher;

/// Collects published events in memory.
///
/// Used by tests to assert on the event stream and by local runs that
/// have no transport configured.
pub struct InMemoryEventPublisher {
    events: Mutex<Vec<EventEnvelope>>,
}

impl InMemoryEventPublisher {
    /// Creates an empty publisher.
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of everything published so far.
    pub fn published(&self) -> Vec<EventEnvelope> {
        self.events.lock().unwrap().clone()
    }
}

impl Default for InMemoryEventPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventPublisher {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{EventId, Timestamp};
    use serde_json::json;

    #[tokio::test]
    async fn publish_appends_in_order() {
        let publisher = InMemoryEventPublisher::new();

        for event_type in ["reservation.created", "reservation.cancelled"] {
            publisher
                .publish(EventEnvelope {
                    event_id: EventId::new(),
                    event_type: event_type.to_string(),
                    aggregate_id: "r-1".to_string(),
                    occurred_at: Timestamp::now(),
                    payload: json!({}),
                })
                .await
                .unwrap();
        }

        let published = publisher.published();
        assert_eq!(published.len(), 2);
        assert_eq!(published[0].event_type, "reservation.created");
        assert_eq!(published[1].event_type, "reservation.cancelled");
    }
}
