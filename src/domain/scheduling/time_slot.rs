//! Bookable time slot entity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SlotId, StartTime, Timestamp};

/// A fixed-duration bookable unit, identified by `(slot_date, start_time)`.
///
/// # Invariants
///
/// - `0 <= current_reservations <= max_capacity` at all times
/// - `is_available` is derived: true iff `current_reservations < max_capacity`.
///   It is stored for query convenience but recomputed on every mutation and
///   never trusted as an independent source of truth.
///
/// Occupancy counters are only ever changed through the slot ledger's atomic
/// reserve/release operations; this entity carries the single-copy semantics
/// those operations must preserve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Unique identifier for ledger mutations.
    pub id: SlotId,

    /// Calendar day of the slot, normalized to a UTC day boundary.
    pub slot_date: NaiveDate,

    /// Wall-clock start of the slot.
    pub start_time: StartTime,

    /// Slot length in minutes.
    pub duration_minutes: u16,

    /// Maximum simultaneous reservations this slot accepts.
    pub max_capacity: u32,

    /// Reservations currently holding a unit of capacity.
    pub current_reservations: u32,

    /// Derived availability flag; see type-level invariants.
    pub is_available: bool,
}

impl TimeSlot {
    /// Creates an empty slot with the given capacity.
    pub fn new(
        slot_date: NaiveDate,
        start_time: StartTime,
        duration_minutes: u16,
        max_capacity: u32,
    ) -> Self {
        Self {
            id: SlotId::new(),
            slot_date,
            start_time,
            duration_minutes,
            max_capacity,
            current_reservations: 0,
            is_available: max_capacity > 0,
        }
    }

    /// The instant this slot begins, composed in UTC.
    pub fn starts_at(&self) -> Timestamp {
        self.start_time.on_date(self.slot_date)
    }

    /// True if at least one unit of capacity remains.
    pub fn has_capacity(&self) -> bool {
        self.current_reservations < self.max_capacity
    }

    /// Takes one unit of capacity if any remains.
    ///
    /// Returns false without mutating when the slot is already full. This
    /// is the check-and-increment the ledger must execute atomically; the
    /// entity keeps the two fused so no caller can observe the state
    /// between them.
    pub fn try_reserve(&mut self) -> bool {
        if !self.has_capacity() {
            return false;
        }
        self.current_reservations += 1;
        self.recompute_availability();
        true
    }

    /// Returns one unit of capacity, flooring at zero.
    pub fn release(&mut self) {
        self.current_reservations = self.current_reservations.saturating_sub(1);
        self.recompute_availability();
    }

    fn recompute_availability(&mut self) {
        self.is_available = self.current_reservations < self.max_capacity;
    }
}
