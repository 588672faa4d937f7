//! CreateReservationHandler - command handler for booking a slot.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{error, warn};

use crate::domain::catalog::Product;
use crate::domain::foundation::{
    EventId, ReservationId, SerializableDomainEvent, StartTime, Timestamp,
};
use crate::domain::reservation::{
    check_booking_window, quote, Currency, CustomerContact, LineItem, PaymentMethod, QuoteLine,
    Reservation, ReservationError, ReservationEvent,
};
use crate::ports::{EventPublisher, ProductCatalog, ReservationRepository, SlotLedger};

/// Command to create a reservation.
#[derive(Debug, Clone)]
pub struct CreateReservationCommand {
    pub customer: CustomerContact,
    pub slot_date: NaiveDate,
    pub start_time: StartTime,
    pub items: Vec<LineItem>,
    pub payment_method: PaymentMethod,
    pub currency: Currency,
    pub storm_insurance: bool,
}

/// Result of a successful booking.
#[derive(Debug, Clone)]
pub struct CreateReservationResult {
    pub reservation: Reservation,
    pub event: ReservationEvent,
}

/// Handler for creating reservations.
///
/// Runs every validation before any mutation, then persists the
/// reservation and takes slot capacity through the ledger's atomic
/// reserve. A lost race rolls the just-saved record back so no
/// reservation ever implies a slot it does not hold.
pub struct CreateReservationHandler {
    catalog: Arc<dyn ProductCatalog>,
    ledger: Arc<dyn SlotLedger>,
    repository: Arc<dyn ReservationRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CreateReservationHandler {
    pub fn new(
        catalog: Arc<dyn ProductCatalog>,
        ledger: Arc<dyn SlotLedger>,
        repository: Arc<dyn ReservationRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            catalog,
            ledger,
            repository,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateReservationCommand,
    ) -> Result<CreateReservationResult, ReservationError> {
        // 1. Advance-booking window, against the UTC-composed start.
        let scheduled_start = cmd.start_time.on_date(cmd.slot_date);
        check_booking_window(scheduled_start, Timestamp::now())?;

        // 2. Resolve products and validate every line item against them.
        let products = self.resolve_products(&cmd.items).await?;
        validate_items(&cmd.items, &products)?;

        // 3. Resolve the slot; it must exist and have spare capacity.
        let slot = self
            .ledger
            .find_slot(cmd.slot_date, cmd.start_time)
            .await?
            .ok_or_else(|| ReservationError::slot_unavailable(cmd.slot_date, cmd.start_time))?;
        if !slot.is_available || !slot.has_capacity() {
            return Err(ReservationError::slot_unavailable(
                cmd.slot_date,
                cmd.start_time,
            ));
        }

        // 4. Price the bundle.
        let lines: Vec<QuoteLine> = cmd
            .items
            .iter()
            .map(|item| {
                let product = products
                    .iter()
                    .find(|p| p.id == item.product_id)
                    .expect("validated items always resolve");
                QuoteLine {
                    unit_price: product.unit_price,
                    quantity: item.quantity,
                    slot_count: item.slot_count,
                }
            })
            .collect();
        let total_price = quote(&lines, cmd.storm_insurance);

        // 5. Build the aggregate; the payment method decides the initial
        //    status.
        let reservation = Reservation::create(
            ReservationId::new(),
            cmd.customer,
            cmd.slot_date,
            cmd.start_time,
            slot.id,
            cmd.items,
            total_price,
            cmd.payment_method,
            cmd.currency,
            cmd.storm_insurance,
        )?;

        // 6. Persist, then take capacity atomically. Losing the race
        //    rolls the record back.
        self.repository.save(&reservation).await?;

        let reserved = match self.ledger.try_reserve(slot.id).await {
            Ok(reserved) => reserved,
            Err(err) => {
                self.roll_back(&reservation).await;
                return Err(err.into());
            }
        };
        if !reserved {
            self.roll_back(&reservation).await;
            return Err(ReservationError::slot_unavailable(
                reservation.slot_date,
                reservation.start_time,
            ));
        }

        // 7. Publish after the booking is durable. Event delivery is
        //    notification-grade; a publish failure does not unwind the
        //    committed booking.
        let event = ReservationEvent::Created {
            event_id: EventId::new(),
            reservation_id: reservation.id,
            slot_id: slot.id,
            payment_method: reservation.payment_method,
            total_price: reservation.total_price,
            occurred_at: Timestamp::now(),
        };
        if let Err(err) = self.event_publisher.publish(event.to_envelope()).await {
            warn!(reservation_id = %reservation.id, %err, "failed to publish created event");
        }

        Ok(CreateReservationResult { reservation, event })
    }

    async fn resolve_products(
        &self,
        items: &[LineItem],
    ) -> Result<Vec<Product>, ReservationError> {
        let ids: Vec<_> = items.iter().map(|item| item.product_id).collect();
        let products = self.catalog.find_by_ids(&ids).await?;

        for item in items {
            if !products.iter().any(|p| p.id == item.product_id) {
                return Err(ReservationError::product_not_found(item.product_id));
            }
        }
        Ok(products)
    }

    async fn roll_back(&self, reservation: &Reservation) {
        if let Err(err) = self.repository.delete(&reservation.id).await {
            // The record now claims capacity it never held; surface loudly.
            error!(
                reservation_id = %reservation.id,
                %err,
                "failed to roll back reservation after lost slot race"
            );
        }
    }
}

/// Per-product validation: people limit, slot span, safety equipment.
fn validate_items(items: &[LineItem], products: &[Product]) -> Result<(), ReservationError> {
    for item in items {
        let product = products
            .iter()
            .find(|p| p.id == item.product_id)
            .expect("resolve_products checked every id");

        if item.quantity > product.max_people {
            return Err(ReservationError::capacity_exceeded(
                product.kind.as_str(),
                product.max_people,
            ));
        }
        if item.slot_count > product.max_consecutive_slots {
            return Err(ReservationError::validation(
                "slot_count",
                format!(
                    "{} can be booked for at most {} consecutive slots",
                    product.kind,
                    product.max_consecutive_slots
                ),
            ));
        }
        if product.requires_helmet && item.helmets < item.quantity {
            return Err(ReservationError::safety_equipment_missing(
                product.kind.as_str(),
                "helmets",
                item.quantity,
            ));
        }
        if product.requires_vest && item.vests < item.quantity {
            return Err(ReservationError::safety_equipment_missing(
                product.kind.as_str(),
                "life vests",
                item.quantity,
            ));
        }
    }
    Ok(())
}
