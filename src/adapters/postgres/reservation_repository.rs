//! PostgreSQL implementation of the reservation repository.
//!
//! The aggregate spans two tables: `reservations` and its owned
//! `reservation_items`. Writes run in a transaction so the aggregate is
//! persisted as one unit; `reservation_items` cascades on delete.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use crate::domain::foundation::{
    DomainError, ErrorCode, ProductId, ReservationId, SlotId, StartTime, Timestamp,
};
use crate::domain::reservation::{
    Currency, CustomerContact, LineItem, PaymentDetails, PaymentMethod, PaymentStatus,
    Reservation, ReservationStatus,
};
use crate::ports::ReservationRepository;

/// PostgreSQL implementation of the ReservationRepository port.
pub struct PostgresReservationRepository {
    pool: PgPool,
}

impl PostgresReservationRepository {
    /// Creates a new PostgresReservationRepository with the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_items(
        &self,
        reservation_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<LineItem>>, DomainError> {
        let rows: Vec<LineItemRow> = sqlx::query_as(
            r#"
            SELECT reservation_id, product_id, quantity, slot_count, helmets, vests
            FROM reservation_items
            WHERE reservation_id = ANY($1)
            ORDER BY position ASC
            "#,
        )
        .bind(reservation_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to load line items: {}", e),
            )
        })?;

        let mut by_reservation: HashMap<Uuid, Vec<LineItem>> = HashMap::new();
        for row in rows {
            let item = LineItem::try_from(&row)?;
            by_reservation.entry(row.reservation_id).or_default().push(item);
        }
        Ok(by_reservation)
    }
}

/// Database row representation of a reservation.
#[derive(Debug, sqlx::FromRow)]
struct ReservationRow {
    id: Uuid,
    full_name: String,
    email: String,
    phone: String,
    slot_date: NaiveDate,
    start_time: String,
    slot_id: Uuid,
    total_price: f64,
    payment_method: String,
    currency: String,
    storm_insurance: bool,
    status: String,
    payment_transaction_id: Option<String>,
    payment_amount_paid: Option<f64>,
    payment_status: String,
    created_at: DateTime<Utc>,
    payment_due: Option<DateTime<Utc>>,
}

/// Database row representation of a line item.
#[derive(Debug, sqlx::FromRow)]
struct LineItemRow {
    reservation_id: Uuid,
    product_id: Uuid,
    quantity: i32,
    slot_count: i32,
    helmets: i32,
    vests: i32,
}

impl TryFrom<&LineItemRow> for LineItem {
    type Error = DomainError;

    fn try_from(row: &LineItemRow) -> Result<Self, Self::Error> {
        LineItem::new(
            ProductId::from_uuid(row.product_id),
            row.quantity as u32,
            row.slot_count as u32,
            row.helmets as u32,
            row.vests as u32,
        )
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid line item in row: {}", e),
            )
        })
    }
}

fn compose_reservation(
    row: ReservationRow,
    items: Vec<LineItem>,
) -> Result<Reservation, DomainError> {
    let start_time: StartTime = row.start_time.parse().map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid start_time in reservation row: {}", e),
        )
    })?;

    Ok(Reservation {
        id: ReservationId::from_uuid(row.id),
        customer: CustomerContact {
            full_name: row.full_name,
            email: row.email,
            phone: row.phone,
        },
        slot_date: row.slot_date,
        start_time,
        slot_id: SlotId::from_uuid(row.slot_id),
        items,
        total_price: row.total_price,
        payment_method: parse_payment_method(&row.payment_method)?,
        currency: parse_currency(&row.currency)?,
        storm_insurance: row.storm_insurance,
        status: parse_status(&row.status)?,
        payment: PaymentDetails {
            transaction_id: row.payment_transaction_id,
            amount_paid: row.payment_amount_paid,
            status: parse_payment_status(&row.payment_status)?,
        },
        created_at: Timestamp::from_datetime(row.created_at),
        payment_due: row.payment_due.map(Timestamp::from_datetime),
    })
}

fn parse_status(s: &str) -> Result<ReservationStatus, DomainError> {
    match s {
        "pending" => Ok(ReservationStatus::Pending),
        "confirmed" => Ok(ReservationStatus::Confirmed),
        "cancelled" => Ok(ReservationStatus::Cancelled),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid status value: {}", s),
        )),
    }
}

fn status_to_string(status: &ReservationStatus) -> &'static str {
    match status {
        ReservationStatus::Pending => "pending",
        ReservationStatus::Confirmed => "confirmed",
        ReservationStatus::Cancelled => "cancelled",
    }
}

fn parse_payment_method(s: &str) -> Result<PaymentMethod, DomainError> {
    match s {
        "cash" => Ok(PaymentMethod::Cash),
        "card" => Ok(PaymentMethod::Card),
        "transfer" => Ok(PaymentMethod::Transfer),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid payment method value: {}", s),
        )),
    }
}

fn payment_method_to_string(method: &PaymentMethod) -> &'static str {
    match method {
        PaymentMethod::Cash => "cash",
        PaymentMethod::Card => "card",
        PaymentMethod::Transfer => "transfer",
    }
}

fn parse_currency(s: &str) -> Result<Currency, DomainError> {
    match s {
        "local" => Ok(Currency::Local),
        "usd" => Ok(Currency::Usd),
        "eur" => Ok(Currency::Eur),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid currency value: {}", s),
        )),
    }
}

fn currency_to_string(currency: &Currency) -> &'static str {
    match currency {
        Currency::Local => "local",
        Currency::Usd => "usd",
        Currency::Eur => "eur",
    }
}

fn parse_payment_status(s: &str) -> Result<PaymentStatus, DomainError> {
    match s {
        "pending" => Ok(PaymentStatus::Pending),
        "confirmed" => Ok(PaymentStatus::Confirmed),
        "cancelled" => Ok(PaymentStatus::Cancelled),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid payment status value: {}", s),
        )),
    }
}

fn payment_status_to_string(status: &PaymentStatus) -> &'static str {
    match status {
        PaymentStatus::Pending => "pending",
        PaymentStatus::Confirmed => "confirmed",
        PaymentStatus::Cancelled => "cancelled",
    }
}

const RESERVATION_COLUMNS: &str = "id, full_name, email, phone, slot_date, start_time, slot_id, \
     total_price, payment_method, currency, storm_insurance, status, \
     payment_transaction_id, payment_amount_paid, payment_status, created_at, payment_due";

#[async_trait]
impl ReservationRepository for PostgresReservationRepository {
    async fn save(&self, reservation: &Reservation) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to open transaction: {}", e),
            )
        })?;

        sqlx::query(
            r#"
            INSERT INTO reservations (
                id, full_name, email, phone, slot_date, start_time, slot_id,
                total_price, payment_method, currency, storm_insurance, status,
                payment_transaction_id, payment_amount_paid, payment_status,
                created_at, payment_due
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            "#,
        )
        .bind(reservation.id.as_uuid())
        .bind(&reservation.customer.full_name)
        .bind(&reservation.customer.email)
        .bind(&reservation.customer.phone)
        .bind(reservation.slot_date)
        .bind(reservation.start_time.to_string())
        .bind(reservation.slot_id.as_uuid())
        .bind(reservation.total_price)
        .bind(payment_method_to_string(&reservation.payment_method))
        .bind(currency_to_string(&reservation.currency))
        .bind(reservation.storm_insurance)
        .bind(status_to_string(&reservation.status))
        .bind(&reservation.payment.transaction_id)
        .bind(reservation.payment.amount_paid)
        .bind(payment_status_to_string(&reservation.payment.status))
        .bind(reservation.created_at.as_datetime())
        .bind(reservation.payment_due.map(|t| *t.as_datetime()))
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to save reservation: {}", e),
            )
        })?;

        for (position, item) in reservation.items.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO reservation_items (
                    reservation_id, position, product_id, quantity, slot_count, helmets, vests
                ) VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(reservation.id.as_uuid())
            .bind(position as i32)
            .bind(item.product_id.as_uuid())
            .bind(item.quantity as i32)
            .bind(item.slot_count as i32)
            .bind(item.helmets as i32)
            .bind(item.vests as i32)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to save line item: {}", e),
                )
            })?;
        }

        tx.commit().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to commit reservation: {}", e),
            )
        })?;

        Ok(())
    }

    async fn update(&self, reservation: &Reservation) -> Result<(), DomainError> {
        // Only the mutable fields: status and payment metadata. The rest
        // of the aggregate is immutable after creation.
        let result = sqlx::query(
            r#"
            UPDATE reservations SET
                status = $2,
                payment_transaction_id = $3,
                payment_amount_paid = $4,
                payment_status = $5
            WHERE id = $1
            "#,
        )
        .bind(reservation.id.as_uuid())
        .bind(status_to_string(&reservation.status))
        .bind(&reservation.payment.transaction_id)
        .bind(reservation.payment.amount_paid)
        .bind(payment_status_to_string(&reservation.payment.status))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update reservation: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ReservationNotFound,
                "Reservation not found",
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &ReservationId) -> Result<Option<Reservation>, DomainError> {
        let row: Option<ReservationRow> = sqlx::query_as(&format!(
            "SELECT {} FROM reservations WHERE id = $1",
            RESERVATION_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to find reservation: {}", e),
            )
        })?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut items = self.load_items(&[row.id]).await?;
        let row_items = items.remove(&row.id).unwrap_or_default();
        compose_reservation(row, row_items).map(Some)
    }

    async fn find_by_email(&self, email: &str) -> Result<Vec<Reservation>, DomainError> {
        let rows: Vec<ReservationRow> = sqlx::query_as(&format!(
            "SELECT {} FROM reservations WHERE email = $1 ORDER BY created_at DESC",
            RESERVATION_COLUMNS
        ))
        .bind(email)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list reservations: {}", e),
            )
        })?;

        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let mut items = self.load_items(&ids).await?;

        rows.into_iter()
            .map(|row| {
                let row_items = items.remove(&row.id).unwrap_or_default();
                compose_reservation(row, row_items)
            })
            .collect()
    }

    async fn delete(&self, id: &ReservationId) -> Result<(), DomainError> {
        // reservation_items cascades.
        let result = sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to delete reservation: {}", e),
                )
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ReservationNotFound,
                "Reservation not found",
            ));
        }

        Ok(())
    }
}
