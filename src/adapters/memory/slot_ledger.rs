//! In-memory implementation of the slot capacity ledger.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Mutex;

use crate::domain::foundation::{DomainError, SlotId, StartTime};
use crate::domain::scheduling::TimeSlot;
use crate::ports::SlotLedger;

/// Mutex-guarded slot ledger.
///
/// The lock is taken per operation, so the capacity check and the
/// increment inside `try_reserve` are a single critical section: the
/// in-memory equivalent of the Postgres adapter's conditional update.
pub struct InMemorySlotLedger {
    slots: Mutex<Vec<TimeSlot>>,
}

impl InMemorySlotLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(Vec::new()),
        }
    }

    /// Creates a ledger pre-loaded with the given slots.
    pub fn with_slots(slots: Vec<TimeSlot>) -> Self {
        Self {
            slots: Mutex::new(slots),
        }
    }

    /// Snapshot of one slot, for assertions.
    pub fn get(&self, slot_id: SlotId) -> Option<TimeSlot> {
        self.slots
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == slot_id)
            .cloned()
    }
}

impl Default for InMemorySlotLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SlotLedger for InMemorySlotLedger {
    async fn find_slot(
        &self,
        date: NaiveDate,
        start_time: StartTime,
    ) -> Result<Option<TimeSlot>, DomainError> {
        let slots = self.slots.lock().unwrap();
        Ok(slots
            .iter()
            .find(|s| s.slot_date == date && s.start_time == start_time)
            .cloned())
    }

    async fn list_for_date(&self, date: NaiveDate) -> Result<Vec<TimeSlot>, DomainError> {
        let slots = self.slots.lock().unwrap();
        let mut day: Vec<TimeSlot> = slots
            .iter()
            .filter(|s| s.slot_date == date)
            .cloned()
            .collect();
        day.sort_by_key(|s| s.start_time);
        Ok(day)
    }

    async fn try_reserve(&self, slot_id: SlotId) -> Result<bool, DomainError> {
        let mut slots = self.slots.lock().unwrap();
        match slots.iter_mut().find(|s| s.id == slot_id) {
            Some(slot) => Ok(slot.try_reserve()),
            None => Ok(false),
        }
    }

    async fn release(&self, slot_id: SlotId) -> Result<(), DomainError> {
        let mut slots = self.slots.lock().unwrap();
        if let Some(slot) = slots.iter_mut().find(|s| s.id == slot_id) {
            debug_assert!(
                slot.current_reservations > 0,
                "release without a matching reserve"
            );
            slot.release();
        }
        Ok(())
    }

    async fn insert_slots(&self, new_slots: &[TimeSlot]) -> Result<u64, DomainError> {
        let mut slots = self.slots.lock().unwrap();
        let mut inserted = 0;
        for slot in new_slots {
            let exists = slots
                .iter()
                .any(|s| s.slot_date == slot.slot_date && s.start_time == slot.start_time);
            if !exists {
                slots.push(slot.clone());
                inserted += 1;
            }
        }
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::scheduling::SlotWindow;
    use std::sync::Arc;

    fn day_one() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()
    }

    fn single_slot(capacity: u32) -> (InMemorySlotLedger, SlotId) {
        let slot = TimeSlot::new(day_one(), "09:30".parse().unwrap(), 30, capacity);
        let id = slot.id;
        (InMemorySlotLedger::with_slots(vec![slot]), id)
    }

    #[tokio::test]
    async fn finds_slots_by_date_and_time() {
        let (ledger, _) = single_slot(10);

        let found = ledger
            .find_slot(day_one(), "09:30".parse().unwrap())
            .await
            .unwrap();
        assert!(found.is_some());

        let missing = ledger
            .find_slot(day_one(), "10:00".parse().unwrap())
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn list_for_date_is_sorted_by_start_time() {
        let slots = SlotWindow::default().generate(day_one());
        let ledger = InMemorySlotLedger::with_slots(slots);

        let day = ledger.list_for_date(day_one()).await.unwrap();
        assert_eq!(day.len(), 20);
        assert!(day.windows(2).all(|w| w[0].start_time < w[1].start_time));
    }

    #[tokio::test]
    async fn reserve_and_release_roundtrip() {
        let (ledger, id) = single_slot(2);

        assert!(ledger.try_reserve(id).await.unwrap());
        assert_eq!(ledger.get(id).unwrap().current_reservations, 1);

        ledger.release(id).await.unwrap();
        assert_eq!(ledger.get(id).unwrap().current_reservations, 0);
        assert!(ledger.get(id).unwrap().is_available);
    }

    #[tokio::test]
    async fn reserve_fails_once_capacity_is_exhausted() {
        let (ledger, id) = single_slot(1);

        assert!(ledger.try_reserve(id).await.unwrap());
        assert!(!ledger.try_reserve(id).await.unwrap());
        assert_eq!(ledger.get(id).unwrap().current_reservations, 1);
    }

    #[tokio::test]
    async fn reserve_on_unknown_slot_reports_no_capacity() {
        let ledger = InMemorySlotLedger::new();
        assert!(!ledger.try_reserve(SlotId::new()).await.unwrap());
    }

    #[tokio::test]
    async fn insert_slots_skips_existing_keys() {
        let slots = SlotWindow::default().generate(day_one());
        let ledger = InMemorySlotLedger::new();

        let first = ledger.insert_slots(&slots).await.unwrap();
        assert_eq!(first, slots.len() as u64);

        // Re-seeding the same window must not duplicate or reset anything.
        let again = ledger.insert_slots(&slots).await.unwrap();
        assert_eq!(again, 0);
    }

    // ════════════════════════════════════════════════════════════════════
    // Concurrency property: N racing callers, capacity C, exactly
    // min(N, C) succeed and the counter moves by exactly min(N, C).
    // ════════════════════════════════════════════════════════════════════

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn concurrent_reserves_never_overshoot_capacity() {
        const CALLERS: usize = 50;
        const CAPACITY: u32 = 10;

        let (ledger, id) = single_slot(CAPACITY);
        let ledger = Arc::new(ledger);

        let mut handles = Vec::new();
        for _ in 0..CALLERS {
            let ledger = Arc::clone(&ledger);
            handles.push(tokio::spawn(
                async move { ledger.try_reserve(id).await.unwrap() },
            ));
        }

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap() {
                successes += 1;
            }
        }

        assert_eq!(successes, CAPACITY as usize);

        let slot = ledger.get(id).unwrap();
        assert_eq!(slot.current_reservations, CAPACITY);
        assert!(!slot.is_available);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn fewer_callers_than_capacity_all_succeed() {
        const CALLERS: usize = 4;
        const CAPACITY: u32 = 10;

        let (ledger, id) = single_slot(CAPACITY);
        let ledger = Arc::new(ledger);

        let mut handles = Vec::new();
        for _ in 0..CALLERS {
            let ledger = Arc::clone(&ledger);
            handles.push(tokio::spawn(
                async move { ledger.try_reserve(id).await.unwrap() },
            ));
        }

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap() {
                successes += 1;
            }
        }

        assert_eq!(successes, CALLERS);
        assert_eq!(ledger.get(id).unwrap().current_reservations, CALLERS as u32);
        assert!(ledger.get(id).unwrap().is_available);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn mixed_reserves_and_releases_keep_the_invariant() {
        const ROUNDS: usize = 30;

        let (ledger, id) = single_slot(5);
        let ledger = Arc::new(ledger);

        let mut handles = Vec::new();
        for _ in 0..ROUNDS {
            let ledger = Arc::clone(&ledger);
            handles.push(tokio::spawn(async move {
                if ledger.try_reserve(id).await.unwrap() {
                    ledger.release(id).await.unwrap();
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let slot = ledger.get(id).unwrap();
        assert_eq!(slot.current_reservations, 0);
        assert!(slot.is_available);
        assert_eq!(
            slot.is_available,
            slot.current_reservations < slot.max_capacity
        );
    }
}
