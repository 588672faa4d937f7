//! CancelReservationHandler - command handler for cancelling a booking.

use std::sync::Arc;

use tracing::warn;

use crate::domain::foundation::{
    EventId, ReservationId, SerializableDomainEvent, StateMachine, Timestamp,
};
use crate::domain::reservation::{
    check_cancellation_window, Reservation, ReservationError, ReservationEvent,
    ReservationStatus,
};
use crate::ports::{EventPublisher, ReservationRepository, SlotLedger};

/// Command to cancel a reservation.
#[derive(Debug, Clone)]
pub struct CancelReservationCommand {
    pub reservation_id: ReservationId,
}

/// Result of a successful cancellation.
#[derive(Debug, Clone)]
pub struct CancelReservationResult {
    pub reservation: Reservation,
    pub event: ReservationEvent,
}

/// Handler for cancelling reservations.
///
/// Cancellation is free only while more than two hours remain before the
/// scheduled start. On success the status flips to cancelled, the update
/// is persisted, and the slot's capacity unit is released exactly once.
pub struct CancelReservationHandler {
    repository: Arc<dyn ReservationRepository>,
    ledger: Arc<dyn SlotLedger>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CancelReservationHandler {
    pub fn new(
        repository: Arc<dyn ReservationRepository>,
        ledger: Arc<dyn SlotLedger>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            ledger,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: CancelReservationCommand,
    ) -> Result<CancelReservationResult, ReservationError> {
        // 1. Look up the reservation.
        let mut reservation = self
            .repository
            .find_by_id(&cmd.reservation_id)
            .await?
            .ok_or_else(|| ReservationError::not_found(cmd.reservation_id))?;

        // 2. A cancelled reservation released its slot already; cancelling
        //    again must not release twice.
        if reservation.status == ReservationStatus::Cancelled {
            return Err(ReservationError::already_cancelled(reservation.id));
        }

        // 3. Cancellation policy, against the UTC-composed start.
        check_cancellation_window(reservation.scheduled_start(), Timestamp::now())?;

        // 4. Transition and persist before touching the ledger; if the
        //    update fails the slot is still legitimately held.
        debug_assert!(reservation
            .status
            .can_transition_to(&ReservationStatus::Cancelled));
        reservation.cancel()?;
        self.repository.update(&reservation).await?;

        // 5. Release the capacity unit.
        self.ledger.release(reservation.slot_id).await?;

        // 6. Publish; notification-grade, never unwinds the cancellation.
        let event = ReservationEvent::Cancelled {
            event_id: EventId::new(),
            reservation_id: reservation.id,
            slot_id: reservation.slot_id,
            occurred_at: Timestamp::now(),
        };
        if let Err(err) = self.event_publisher.publish(event.to_envelope()).await {
            warn!(reservation_id = %reservation.id, %err, "failed to publish cancelled event");
        }

        Ok(CancelReservationResult { reservation, event })
    }
}
