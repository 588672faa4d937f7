//! ExpirePendingReservationHandler - sweeps abandoned pending bookings.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::foundation::{
    EventId, ReservationId, SerializableDomainEvent, Timestamp,
};
use crate::domain::reservation::{ReservationError, ReservationEvent, ReservationStatus};
use crate::ports::{EventPublisher, ReservationRepository, SlotLedger};

/// Command to sweep one reservation whose payment failed.
#[derive(Debug, Clone)]
pub struct ExpirePendingReservationCommand {
    pub reservation_id: ReservationId,
}

/// What the sweep found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepOutcome {
    /// Still pending: removed, slot released.
    Swept,
    /// Confirmed or cancelled in the meantime; left alone.
    Kept,
    /// Already gone; nothing to do.
    AlreadyGone,
}

/// Handler removing a still-pending reservation after its payment failed.
///
/// Invoked by an external scheduler after the gateway's grace delay, so
/// the core carries no timers. The handler is idempotent: re-running it
/// for a reservation that was already swept, confirmed, or cancelled does
/// nothing.
pub struct ExpirePendingReservationHandler {
    repository: Arc<dyn ReservationRepository>,
    ledger: Arc<dyn SlotLedger>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl ExpirePendingReservationHandler {
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
        cmd: ExpirePendingReservationCommand,
    ) -> Result<SweepOutcome, ReservationError> {
        let reservation = match self.repository.find_by_id(&cmd.reservation_id).await? {
            Some(reservation) => reservation,
            None => return Ok(SweepOutcome::AlreadyGone),
        };

        // Only a reservation still waiting on its payment is abandoned;
        // anything else settled its slot some other way.
        if reservation.status != ReservationStatus::Pending {
            return Ok(SweepOutcome::Kept);
        }

        // Remove first, release second: a crash between the two leaks one
        // unit of capacity at worst, never double-books.
        self.repository.delete(&reservation.id).await?;
        self.ledger.release(reservation.slot_id).await?;

        info!(
            reservation_id = %reservation.id,
            slot_id = %reservation.slot_id,
            "swept abandoned pending reservation"
        );

        let event = ReservationEvent::Expired {
            event_id: EventId::new(),
            reservation_id: reservation.id,
            occurred_at: Timestamp::now(),
        };
        if let Err(err) = self.event_publisher.publish(event.to_envelope()).await {
            warn!(reservation_id = %reservation.id, %err, "failed to publish expired event");
        }

        Ok(SweepOutcome::Swept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryEventPublisher, InMemoryReservationRepository, InMemorySlotLedger,
    };
    use crate::domain::foundation::ProductId;
    use crate::domain::reservation::{
        Currency, CustomerContact, LineItem, PaymentMethod, Reservation,
    };
    use crate::domain::scheduling::TimeSlot;
    use chrono::NaiveDate;

    struct Fixture {
        repository: Arc<InMemoryReservationRepository>,
        ledger: Arc<InMemorySlotLedger>,
        publisher: Arc<InMemoryEventPublisher>,
        reservation: Reservation,
    }

    fn booked_fixture(payment_method: PaymentMethod) -> Fixture {
        let mut slot = TimeSlot::new(
            NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            "10:00".parse().unwrap(),
            30,
            10,
        );
        assert!(slot.try_reserve());

        let reservation = Reservation::create(
            ReservationId::new(),
            CustomerContact::new("Ana Costa", "ana@example.com", "+54 11 5555 0101").unwrap(),
            slot.slot_date,
            slot.start_time,
            slot.id,
            vec![LineItem::new(ProductId::new(), 1, 1, 0, 0).unwrap()],
            40.0,
            payment_method,
            Currency::Local,
            false,
        )
        .unwrap();

        Fixture {
            repository: Arc::new(InMemoryReservationRepository::with_reservation(
                reservation.clone(),
            )),
            ledger: Arc::new(InMemorySlotLedger::with_slots(vec![slot])),
            publisher: Arc::new(InMemoryEventPublisher::new()),
            reservation,
        }
    }

    impl Fixture {
        fn handler(&self) -> ExpirePendingReservationHandler {
            ExpirePendingReservationHandler::new(
                self.repository.clone(),
                self.ledger.clone(),
                self.publisher.clone(),
            )
        }
    }

    #[tokio::test]
    async fn sweeps_a_pending_reservation_and_releases_its_slot() {
        let fx = booked_fixture(PaymentMethod::Cash);

        let outcome = fx
            .handler()
            .handle(ExpirePendingReservationCommand {
                reservation_id: fx.reservation.id,
            })
            .await
            .unwrap();

        assert_eq!(outcome, SweepOutcome::Swept);
        assert!(fx.repository.is_empty());
        assert_eq!(
            fx.ledger
                .get(fx.reservation.slot_id)
                .unwrap()
                .current_reservations,
            0
        );

        let events = fx.publisher.published();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, "reservation.expired");
    }

    #[tokio::test]
    async fn keeps_a_confirmed_reservation() {
        let fx = booked_fixture(PaymentMethod::Card);

        let outcome = fx
            .handler()
            .handle(ExpirePendingReservationCommand {
                reservation_id: fx.reservation.id,
            })
            .await
            .unwrap();

        assert_eq!(outcome, SweepOutcome::Kept);
        assert_eq!(fx.repository.len(), 1);
        assert_eq!(
            fx.ledger
                .get(fx.reservation.slot_id)
                .unwrap()
                .current_reservations,
            1
        );
    }

    #[tokio::test]
    async fn sweeping_twice_is_idempotent() {
        let fx = booked_fixture(PaymentMethod::Cash);
        let cmd = ExpirePendingReservationCommand {
            reservation_id: fx.reservation.id,
        };

        assert_eq!(fx.handler().handle(cmd.clone()).await.unwrap(), SweepOutcome::Swept);
        assert_eq!(
            fx.handler().handle(cmd).await.unwrap(),
            SweepOutcome::AlreadyGone
        );

        // The slot was released exactly once.
        assert_eq!(
            fx.ledger
                .get(fx.reservation.slot_id)
                .unwrap()
                .current_reservations,
            0
        );
    }
}
