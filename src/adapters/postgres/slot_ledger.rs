//! PostgreSQL implementation of the slot capacity ledger.
//!
//! `try_reserve` and `release` are each a single conditional `UPDATE`:
//! the capacity guard sits in the same statement as the counter change,
//! so the database serializes racing callers and the invariant
//! `0 <= current_reservations <= max_capacity` holds across any number of
//! processes sharing the store. In-process locking could not give that
//! guarantee.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, SlotId, StartTime};
use crate::domain::scheduling::TimeSlot;
use crate::ports::SlotLedger;

/// PostgreSQL implementation of the SlotLedger port.
pub struct PostgresSlotLedger {
    pool: PgPool,
}

impl PostgresSlotLedger {
    /// Creates a new PostgresSlotLedger with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a time slot.
#[derive(Debug, sqlx::FromRow)]
struct TimeSlotRow {
    id: Uuid,
    slot_date: NaiveDate,
    start_time: String,
    duration_minutes: i32,
    max_capacity: i32,
    current_reservations: i32,
    is_available: bool,
}

impl TryFrom<TimeSlotRow> for TimeSlot {
    type Error = DomainError;

    fn try_from(row: TimeSlotRow) -> Result<Self, Self::Error> {
        let start_time: StartTime = row.start_time.parse().map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid start_time in slot row: {}", e),
            )
        })?;

        if row.current_reservations < 0 || row.current_reservations > row.max_capacity {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                format!(
                    "Slot {} counters out of bounds: {}/{}",
                    row.id, row.current_reservations, row.max_capacity
                ),
            ));
        }

        Ok(TimeSlot {
            id: SlotId::from_uuid(row.id),
            slot_date: row.slot_date,
            start_time,
            duration_minutes: row.duration_minutes as u16,
            max_capacity: row.max_capacity as u32,
            current_reservations: row.current_reservations as u32,
            is_available: row.is_available,
        })
    }
}

const SLOT_COLUMNS: &str =
    "id, slot_date, start_time, duration_minutes, max_capacity, current_reservations, is_available";

#[async_trait]
impl SlotLedger for PostgresSlotLedger {
    async fn find_slot(
        &self,
        date: NaiveDate,
        start_time: StartTime,
    ) -> Result<Option<TimeSlot>, DomainError> {
        let row: Option<TimeSlotRow> = sqlx::query_as(&format!(
            "SELECT {} FROM time_slots WHERE slot_date = $1 AND start_time = $2",
            SLOT_COLUMNS
        ))
        .bind(date)
        .bind(start_time.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to find slot: {}", e))
        })?;

        row.map(TimeSlot::try_from).transpose()
    }

    async fn list_for_date(&self, date: NaiveDate) -> Result<Vec<TimeSlot>, DomainError> {
        let rows: Vec<TimeSlotRow> = sqlx::query_as(&format!(
            "SELECT {} FROM time_slots WHERE slot_date = $1 ORDER BY start_time ASC",
            SLOT_COLUMNS
        ))
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to list slots: {}", e))
        })?;

        rows.into_iter().map(TimeSlot::try_from).collect()
    }

    async fn try_reserve(&self, slot_id: SlotId) -> Result<bool, DomainError> {
        // The WHERE guard and the increment run as one statement; a caller
        // that finds the guard false mutated nothing and lost the race.
        let result = sqlx::query(
            r#"
            UPDATE time_slots
            SET current_reservations = current_reservations + 1,
                is_available = (current_reservations + 1) < max_capacity
            WHERE id = $1
              AND current_reservations < max_capacity
            "#,
        )
        .bind(slot_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to reserve slot: {}", e),
            )
        })?;

        Ok(result.rows_affected() == 1)
    }

    async fn release(&self, slot_id: SlotId) -> Result<(), DomainError> {
        // Floors at zero by guarding in the same statement; the derived
        // flag is recomputed from the post-decrement counter.
        sqlx::query(
            r#"
            UPDATE time_slots
            SET current_reservations = current_reservations - 1,
                is_available = (current_reservations - 1) < max_capacity
            WHERE id = $1
              AND current_reservations > 0
            "#,
        )
        .bind(slot_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to release slot: {}", e),
            )
        })?;

        Ok(())
    }

    async fn insert_slots(&self, slots: &[TimeSlot]) -> Result<u64, DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to open transaction: {}", e),
            )
        })?;

        let mut inserted = 0u64;
        for slot in slots {
            let result = sqlx::query(
                r#"
                INSERT INTO time_slots (
                    id, slot_date, start_time, duration_minutes,
                    max_capacity, current_reservations, is_available
                ) VALUES ($1, $2, $3, $4, $5, $6, $7)
                ON CONFLICT (slot_date, start_time) DO NOTHING
                "#,
            )
            .bind(slot.id.as_uuid())
            .bind(slot.slot_date)
            .bind(slot.start_time.to_string())
            .bind(i32::from(slot.duration_minutes))
            .bind(slot.max_capacity as i32)
            .bind(slot.current_reservations as i32)
            .bind(slot.is_available)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to insert slot: {}", e),
                )
            })?;

            inserted += result.rows_affected();
        }

        tx.commit().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to commit slot seed: {}", e),
            )
        })?;

        Ok(inserted)
    }
}
