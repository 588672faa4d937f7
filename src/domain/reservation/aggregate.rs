//! Reservation aggregate entity.
//!
//! The Reservation is the aggregate root of a booking: it owns its line
//! items and references its products and time slot by identity. After
//! creation, only the status and payment metadata ever change; a
//! cancelled reservation stays on record, it is never deleted by the
//! normal flow.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    ReservationId, SlotId, StartTime, StateMachine, Timestamp, ValidationError,
};
use crate::domain::reservation::{
    Currency, LineItem, PaymentDetails, PaymentMethod, PaymentStatus, ReservationError,
    ReservationStatus,
};

/// Hours before the scheduled start by which a cash payment is due.
const CASH_PAYMENT_LEAD_HOURS: i64 = 2;

/// Who booked, and how to reach them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerContact {
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

impl CustomerContact {
    /// Creates validated contact details.
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let full_name = full_name.into();
        let email = email.into();
        let phone = phone.into();

        if full_name.trim().is_empty() {
            return Err(ValidationError::empty_field("full_name"));
        }
        if email.trim().is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        if !email.contains('@') {
            return Err(ValidationError::invalid_format("email", "missing @ symbol"));
        }
        if phone.trim().is_empty() {
            return Err(ValidationError::empty_field("phone"));
        }

        Ok(Self {
            full_name,
            email,
            phone,
        })
    }
}

/// Reservation aggregate - one booked outing.
///
/// # Invariants
///
/// - `items` is non-empty
/// - `status` transitions follow the [`ReservationStatus`] state machine
/// - `payment_due` is set iff `payment_method` is cash
/// - While status is `Pending` or `Confirmed`, the referenced slot holds
///   one unit of capacity for this reservation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    /// Unique identifier for this reservation.
    pub id: ReservationId,

    /// Customer contact details.
    pub customer: CustomerContact,

    /// Calendar day of the booked slot (UTC day).
    pub slot_date: NaiveDate,

    /// Wall-clock start of the booked slot.
    pub start_time: StartTime,

    /// The slot whose capacity this reservation holds while live.
    pub slot_id: SlotId,

    /// Ordered product line items; owned by the aggregate.
    pub items: Vec<LineItem>,

    /// Total price as computed by the pricing engine, unrounded.
    pub total_price: f64,

    /// How the customer pays.
    pub payment_method: PaymentMethod,

    /// Billing currency.
    pub currency: Currency,

    /// Whether the storm-insurance surcharge was taken.
    pub storm_insurance: bool,

    /// Lifecycle status.
    pub status: ReservationStatus,

    /// Gateway-facing payment metadata.
    pub payment: PaymentDetails,

    /// When the reservation was created.
    pub created_at: Timestamp,

    /// Cash deadline: scheduled start minus two hours. None for card and
    /// transfer.
    pub payment_due: Option<Timestamp>,
}

impl Reservation {
    /// Creates a new reservation in its payment-method-dependent initial
    /// state.
    ///
    /// The caller (the create-reservation handler) has already validated
    /// the line items against the catalog and computed `total_price`.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        id: ReservationId,
        customer: CustomerContact,
        slot_date: NaiveDate,
        start_time: StartTime,
        slot_id: SlotId,
        items: Vec<LineItem>,
        total_price: f64,
        payment_method: PaymentMethod,
        currency: Currency,
        storm_insurance: bool,
    ) -> Result<Self, ValidationError> {
        if items.is_empty() {
            return Err(ValidationError::empty_field("items"));
        }

        let scheduled_start = start_time.on_date(slot_date);
        let payment_due = match payment_method {
            PaymentMethod::Cash => Some(scheduled_start.minus_hours(CASH_PAYMENT_LEAD_HOURS)),
            PaymentMethod::Card | PaymentMethod::Transfer => None,
        };

        Ok(Self {
            id,
            customer,
            slot_date,
            start_time,
            slot_id,
            items,
            total_price,
            payment_method,
            currency,
            storm_insurance,
            status: payment_method.initial_status(),
            payment: PaymentDetails::default(),
            created_at: Timestamp::now(),
            payment_due,
        })
    }

    /// The instant this reservation's slot begins, composed in UTC.
    pub fn scheduled_start(&self) -> Timestamp {
        self.start_time.on_date(self.slot_date)
    }

    /// Marks the reservation cancelled.
    ///
    /// The cancellation-window policy runs before this; here only the
    /// state machine is enforced. Releasing the slot is the caller's next
    /// step, exactly once.
    pub fn cancel(&mut self) -> Result<(), ReservationError> {
        if self.status == ReservationStatus::Cancelled {
            return Err(ReservationError::already_cancelled(self.id));
        }

        self.status = self
            .status
            .transition_to(ReservationStatus::Cancelled)
            .map_err(|_| {
                ReservationError::invalid_transition(format!("{:?}", self.status), "cancel")
            })?;
        self.payment.status = PaymentStatus::Cancelled;
        Ok(())
    }

    /// Applies a payment confirmation from the gateway.
    ///
    /// Only a pending (cash) reservation has anything to confirm; card and
    /// transfer were confirmed at creation.
    pub fn confirm_payment(
        &mut self,
        transaction_id: impl Into<String>,
        amount_paid: f64,
    ) -> Result<(), ReservationError> {
        self.status = self
            .status
            .transition_to(ReservationStatus::Confirmed)
            .map_err(|_| {
                ReservationError::invalid_transition(format!("{:?}", self.status), "confirm")
            })?;

        self.payment = PaymentDetails {
            transaction_id: Some(transaction_id.into()),
            amount_paid: Some(amount_paid),
            status: PaymentStatus::Confirmed,
        };
        Ok(())
    }

    /// True while the reservation holds slot capacity.
    pub fn holds_slot(&self) -> bool {
        matches!(
            self.status,
            ReservationStatus::Pending | ReservationStatus::Confirmed
        )
    }
}
