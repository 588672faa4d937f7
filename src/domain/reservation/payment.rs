//! Payment vocabulary for reservations.

use serde::{Deserialize, Serialize};

use crate::domain::reservation::ReservationStatus;

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Paid at the counter; the reservation stays pending until settled.
    Cash,
    Card,
    Transfer,
}

impl PaymentMethod {
    /// The lifecycle state a new reservation enters for this method.
    ///
    /// Card and transfer are pre-authorized by the external gateway and
    /// confirm immediately; cash waits for settlement.
    pub fn initial_status(&self) -> ReservationStatus {
        match self {
            PaymentMethod::Card | PaymentMethod::Transfer => ReservationStatus::Confirmed,
            PaymentMethod::Cash => ReservationStatus::Pending,
        }
    }
}

/// Billing currency accepted by the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Currency {
    Local,
    Usd,
    Eur,
}

/// State of the payment attached to a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Confirmed,
    Cancelled,
}

/// Gateway-facing payment metadata carried on the aggregate.
///
/// Populated by the payment-event handler; empty until the gateway
/// reports back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentDetails {
    pub transaction_id: Option<String>,
    pub amount_paid: Option<f64>,
    pub status: PaymentStatus,
}

impl Default for PaymentDetails {
    fn default() -> Self {
        Self {
            transaction_id: None,
            amount_paid: None,
            status: PaymentStatus::Pending,
        }
    }
}
