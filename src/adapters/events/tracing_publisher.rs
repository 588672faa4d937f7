//! Log-backed event publisher.

use async_trait::async_trait;
use tracing::info;

use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::ports::EventPublisher;

/// Publishes domain events to the structured log.
///
/// The default production publisher: downstream consumers (notification
/// dispatch, analytics) tail the log stream. Swapping in a broker-backed
/// publisher is a one-line change in the bootstrap.
pub struct TracingEventPublisher;

impl TracingEventPublisher {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TracingEventPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for TracingEventPublisher {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        info!(
            event_id = %event.event_id,
            event_type = %event.event_type,
            aggregate_id = %event.aggregate_id,
            payload = %event.payload,
            "domain event"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{EventId, Timestamp};
    use serde_json::json;

    #[tokio::test]
    async fn publish_always_succeeds() {
        let publisher = TracingEventPublisher::new();
        let result = publisher
            .publish(EventEnvelope {
                event_id: EventId::new(),
                event_type: "reservation.created".to_string(),
                aggregate_id: "r-1".to_string(),
                occurred_at: Timestamp::now(),
                payload: json!({"total_price": 180.0}),
            })
            .await;
        assert!(result.is_ok());
    }
}
