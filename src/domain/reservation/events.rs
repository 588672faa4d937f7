//! Domain events emitted by the reservation lifecycle.

use serde::Serialize;

use crate::domain::foundation::{DomainEvent, EventId, ReservationId, SlotId, Timestamp};
use crate::domain::reservation::PaymentMethod;

/// Events published after successful lifecycle transitions.
///
/// Events are emitted after persistence succeeds; a failed operation
/// publishes nothing.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReservationEvent {
    /// A reservation was created and its slot capacity taken.
    Created {
        event_id: EventId,
        reservation_id: ReservationId,
        slot_id: SlotId,
        payment_method: PaymentMethod,
        total_price: f64,
        occurred_at: Timestamp,
    },

    /// The payment gateway confirmed a pending reservation.
    PaymentConfirmed {
        event_id: EventId,
        reservation_id: ReservationId,
        transaction_id: String,
        occurred_at: Timestamp,
    },

    /// The customer cancelled and the slot capacity was released.
    Cancelled {
        event_id: EventId,
        reservation_id: ReservationId,
        slot_id: SlotId,
        occurred_at: Timestamp,
    },

    /// A pending reservation was swept after its payment failed.
    Expired {
        event_id: EventId,
        reservation_id: ReservationId,
        occurred_at: Timestamp,
    },
}

impl DomainEvent for ReservationEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ReservationEvent::Created { .. } => "reservation.created",
            ReservationEvent::PaymentConfirmed { .. } => "reservation.payment_confirmed",
            ReservationEvent::Cancelled { .. } => "reservation.cancelled",
            ReservationEvent::Expired { .. } => "reservation.expired",
        }
    }

    fn aggregate_id(&self) -> String {
        match self {
            ReservationEvent::Created { reservation_id, .. }
            | ReservationEvent::PaymentConfirmed { reservation_id, .. }
            | ReservationEvent::Cancelled { reservation_id, .. }
            | ReservationEvent::Expired { reservation_id, .. } => reservation_id.to_string(),
        }
    }

    fn occurred_at(&self) -> Timestamp {
        match self {
            ReservationEvent::Created { occurred_at, .. }
            | ReservationEvent::PaymentConfirmed { occurred_at, .. }
            | ReservationEvent::Cancelled { occurred_at, .. }
            | ReservationEvent::Expired { occurred_at, .. } => *occurred_at,
        }
    }

    fn event_id(&self) -> EventId {
        match self {
            ReservationEvent::Created { event_id, .. }
            | ReservationEvent::PaymentConfirmed { event_id, .. }
            | ReservationEvent::Cancelled { event_id, .. }
            | ReservationEvent::Expired { event_id, .. } => *event_id,
        }
    }
}
