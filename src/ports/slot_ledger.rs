//! Slot capacity ledger port.
//!
//! The ledger is the sole authority over slot occupancy. Its mutations
//! carry the one correctness guarantee the whole system leans on: a
//! slot's `current_reservations` never exceeds `max_capacity`, under any
//! number of concurrent callers.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::foundation::{DomainError, SlotId, StartTime};
use crate::domain::scheduling::TimeSlot;

/// Authority over time-slot occupancy.
///
/// Implementations must make `try_reserve` a single atomic
/// conditional update against their store: the capacity check and the
/// increment may not be observable as separate steps. Callers racing for
/// the last unit serialize at the store, not in application code, and no
/// ordering is guaranteed across different slots.
#[async_trait]
pub trait SlotLedger: Send + Sync {
    /// Looks up a slot by its unique `(date, start_time)` key.
    ///
    /// The date is a plain UTC calendar day; implementations must not let
    /// a stored time-of-day component or a local timezone shift the match.
    async fn find_slot(
        &self,
        date: NaiveDate,
        start_time: StartTime,
    ) -> Result<Option<TimeSlot>, DomainError>;

    /// Lists every slot on the given day, in start-time order.
    async fn list_for_date(&self, date: NaiveDate) -> Result<Vec<TimeSlot>, DomainError>;

    /// Atomically takes one unit of capacity.
    ///
    /// Returns `Ok(true)` if the increment happened, `Ok(false)` if the
    /// slot was already at capacity at the moment of mutation (the caller
    /// lost the race or the slot was full all along). `is_available` is
    /// recomputed in the same mutation.
    ///
    /// # Errors
    ///
    /// `DatabaseError` on store failure; a full slot is not an error at
    /// this level.
    async fn try_reserve(&self, slot_id: SlotId) -> Result<bool, DomainError>;

    /// Atomically returns one unit of capacity, flooring at zero.
    ///
    /// Idempotency is the caller's responsibility: release must be called
    /// exactly once per reservation that held the slot. `is_available` is
    /// recomputed in the same mutation.
    async fn release(&self, slot_id: SlotId) -> Result<(), DomainError>;

    /// Bulk-inserts freshly generated slots.
    ///
    /// Slots whose `(date, start_time)` key already exists are left
    /// untouched: re-seeding a rolling window must never reset live
    /// occupancy counters.
    async fn insert_slots(&self, slots: &[TimeSlot]) -> Result<u64, DomainError>;
}
