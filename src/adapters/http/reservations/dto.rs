//! Request and response DTOs for the reservation endpoints.
//!
//! Plain structured records mirroring the data model; conversion into
//! domain value objects happens here so handlers receive validated
//! commands.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::catalog::Product;
use crate::domain::foundation::ProductId;
use crate::domain::reservation::{
    Currency, CustomerContact, LineItem, PaymentMethod, PaymentStatus, Reservation,
    ReservationError, ReservationStatus,
};

// ════════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct CustomerDto {
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LineItemDto {
    pub product_id: Uuid,
    pub quantity: u32,
    pub slot_count: u32,
    #[serde(default)]
    pub helmets: u32,
    #[serde(default)]
    pub vests: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateReservationRequest {
    pub customer: CustomerDto,
    pub date: NaiveDate,
    pub start_time: String,
    pub items: Vec<LineItemDto>,
    pub payment_method: PaymentMethod,
    pub currency: Currency,
    #[serde(default)]
    pub storm_insurance: bool,
}

impl CreateReservationRequest {
    /// Validates the raw payload into domain values.
    pub fn into_parts(
        self,
    ) -> Result<
        (
            CustomerContact,
            NaiveDate,
            crate::domain::foundation::StartTime,
            Vec<LineItem>,
            PaymentMethod,
            Currency,
            bool,
        ),
        ReservationError,
    > {
        let customer = CustomerContact::new(
            self.customer.full_name,
            self.customer.email,
            self.customer.phone,
        )?;

        let start_time = self.start_time.parse()?;

        let items = self
            .items
            .into_iter()
            .map(|item| {
                LineItem::new(
                    ProductId::from_uuid(item.product_id),
                    item.quantity,
                    item.slot_count,
                    item.helmets,
                    item.vests,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok((
            customer,
            self.date,
            start_time,
            items,
            self.payment_method,
            self.currency,
            self.storm_insurance,
        ))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AvailableTimesParams {
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListReservationsParams {
    pub email: Option<String>,
}

/// Payment gateway notification payload.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentEventRequest {
    pub reservation_id: Uuid,
    pub status: PaymentEventStatus,
    pub transaction_id: Option<String>,
    pub amount_paid: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentEventStatus {
    Succeeded,
    Failed,
}

// ════════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct ProductResponse {
    pub id: Uuid,
    pub kind: String,
    pub unit_price: f64,
    pub requires_helmet: bool,
    pub requires_vest: bool,
    pub max_people: u32,
    pub max_consecutive_slots: u32,
    pub description: String,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        Self {
            id: *p.id.as_uuid(),
            kind: p.kind.as_str().to_string(),
            unit_price: p.unit_price,
            requires_helmet: p.requires_helmet,
            requires_vest: p.requires_vest,
            max_people: p.max_people,
            max_consecutive_slots: p.max_consecutive_slots,
            description: p.description,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AvailableTimesResponse {
    pub times: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LineItemResponse {
    pub product_id: Uuid,
    pub quantity: u32,
    pub slot_count: u32,
    pub helmets: u32,
    pub vests: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentDetailsResponse {
    pub transaction_id: Option<String>,
    pub amount_paid: Option<f64>,
    pub status: PaymentStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReservationResponse {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub items: Vec<LineItemResponse>,
    pub total_price: f64,
    pub payment_method: PaymentMethod,
    pub currency: Currency,
    pub storm_insurance: bool,
    pub status: ReservationStatus,
    pub payment: PaymentDetailsResponse,
    pub created_at: String,
    pub payment_due: Option<String>,
}

impl From<Reservation> for ReservationResponse {
    fn from(r: Reservation) -> Self {
        Self {
            id: *r.id.as_uuid(),
            full_name: r.customer.full_name,
            email: r.customer.email,
            phone: r.customer.phone,
            date: r.slot_date,
            start_time: r.start_time.to_string(),
            items: r
                .items
                .into_iter()
                .map(|item| LineItemResponse {
                    product_id: *item.product_id.as_uuid(),
                    quantity: item.quantity,
                    slot_count: item.slot_count,
                    helmets: item.helmets,
                    vests: item.vests,
                })
                .collect(),
            total_price: r.total_price,
            payment_method: r.payment_method,
            currency: r.currency,
            storm_insurance: r.storm_insurance,
            status: r.status,
            payment: PaymentDetailsResponse {
                transaction_id: r.payment.transaction_id,
                amount_paid: r.payment.amount_paid,
                status: r.payment.status,
            },
            created_at: r.created_at.to_string(),
            payment_due: r.payment_due.map(|t| t.to_string()),
        }
    }
}

/// Error payload: a distinguishing code plus a human-readable message.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}
