//! EventPublisher port - interface for publishing domain events.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Port for publishing domain events.
///
/// Handlers publish after persistence succeeds; delivery is at-least-once
/// and a publish failure must not unwind the already-committed operation.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publishes a single event.
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_publisher_is_object_safe() {
        fn _accepts_dyn(_publisher: &dyn EventPublisher) {}
    }
}
