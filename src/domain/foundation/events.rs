//! Event infrastructure for domain event publishing.
//!
//! Provides the transport vocabulary for domain events:
//! - `EventId` - unique identifier per event instance (deduplication)
//! - `DomainEvent` - trait implemented by concrete event enums/structs
//! - `EventEnvelope` - serialized wrapper handed to the publisher port

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use uuid::Uuid;

use super::Timestamp;

/// Unique identifier for an event instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    /// Creates a new random EventId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trait that all domain events implement.
///
/// Provides the contract for event identification and routing.
pub trait DomainEvent: Send + Sync {
    /// Returns the event type string (e.g., "reservation.cancelled").
    /// Used for routing and filtering.
    fn event_type(&self) -> &'static str;

    /// Returns the ID of the aggregate that emitted this event.
    fn aggregate_id(&self) -> String;

    /// Returns when the event occurred.
    fn occurred_at(&self) -> Timestamp;

    /// Returns the unique ID for this event instance.
    fn event_id(&self) -> EventId;
}

/// Transport wrapper carrying a serialized domain event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub event_id: EventId,
    pub event_type: String,
    pub aggregate_id: String,
    pub occurred_at: Timestamp,
    pub payload: JsonValue,
}

/// Extension trait that provides `to_envelope()` for serializable domain
/// events.
///
/// Blanket-implemented for any type implementing both `DomainEvent` and
/// `Serialize`, so event authors write no transport boilerplate.
pub trait SerializableDomainEvent: DomainEvent + Serialize {
    /// Converts this domain event into an `EventEnvelope` for transport.
    fn to_envelope(&self) -> EventEnvelope {
        EventEnvelope {
            event_id: self.event_id(),
            event_type: self.event_type().to_string(),
            aggregate_id: self.aggregate_id(),
            occurred_at: self.occurred_at(),
            payload: serde_json::to_value(self)
                .expect("event serialization should never fail for well-formed events"),
        }
    }
}

impl<T: DomainEvent + Serialize> SerializableDomainEvent for T {}
