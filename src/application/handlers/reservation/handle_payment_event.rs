//! HandlePaymentEventHandler - applies gateway payment notifications.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::foundation::{
    EventId, ReservationId, SerializableDomainEvent, Timestamp,
};
use crate::domain::reservation::{
    Reservation, ReservationError, ReservationEvent, ReservationStatus,
};
use crate::ports::{EventPublisher, ReservationRepository};

/// What the gateway reported for a reservation's payment.
#[derive(Debug, Clone)]
pub enum PaymentOutcome {
    Succeeded {
        transaction_id: String,
        amount_paid: f64,
    },
    Failed,
}

/// Command carrying one gateway notification.
#[derive(Debug, Clone)]
pub struct PaymentEventCommand {
    pub reservation_id: ReservationId,
    pub outcome: PaymentOutcome,
}

/// What the handler did with the notification.
#[derive(Debug, Clone)]
pub enum PaymentEventOutcome {
    /// A pending reservation was confirmed.
    Confirmed(Reservation),
    /// Nothing to do: duplicate success notice, or a failure awaiting the
    /// sweep.
    Ignored,
}

/// Handler for payment gateway notifications.
///
/// A success confirms a pending (cash/deferred) reservation and records
/// the transaction. A failure mutates nothing here: the reservation keeps
/// holding its slot until the external sweep expires it after the grace
/// delay.
pub struct HandlePaymentEventHandler {
    repository: Arc<dyn ReservationRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl HandlePaymentEventHandler {
    pub fn new(
        repository: Arc<dyn ReservationRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: PaymentEventCommand,
    ) -> Result<PaymentEventOutcome, ReservationError> {
        let mut reservation = self
            .repository
            .find_by_id(&cmd.reservation_id)
            .await?
            .ok_or_else(|| ReservationError::not_found(cmd.reservation_id))?;

        match cmd.outcome {
            PaymentOutcome::Succeeded {
                transaction_id,
                amount_paid,
            } => {
                // Gateways redeliver; a second success notice for an
                // already-confirmed reservation is a no-op, not an error.
                if reservation.status == ReservationStatus::Confirmed
                    && reservation.payment.transaction_id.is_some()
                {
                    return Ok(PaymentEventOutcome::Ignored);
                }

                reservation.confirm_payment(transaction_id.clone(), amount_paid)?;
                self.repository.update(&reservation).await?;

                let event = ReservationEvent::PaymentConfirmed {
                    event_id: EventId::new(),
                    reservation_id: reservation.id,
                    transaction_id,
                    occurred_at: Timestamp::now(),
                };
                if let Err(err) = self.event_publisher.publish(event.to_envelope()).await {
                    warn!(
                        reservation_id = %reservation.id,
                        %err,
                        "failed to publish payment-confirmed event"
                    );
                }

                Ok(PaymentEventOutcome::Confirmed(reservation))
            }
            PaymentOutcome::Failed => {
                info!(
                    reservation_id = %reservation.id,
                    "payment failed; reservation left for the pending sweep"
                );
                Ok(PaymentEventOutcome::Ignored)
            }
        }
    }
}
