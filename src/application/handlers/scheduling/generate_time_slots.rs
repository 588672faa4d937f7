//! GenerateTimeSlotsHandler - seeds the rolling slot window.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::domain::reservation::ReservationError;
use crate::domain::scheduling::SlotWindow;
use crate::ports::SlotLedger;

/// Command to seed slots for a rolling window.
#[derive(Debug, Clone)]
pub struct GenerateTimeSlotsCommand {
    pub window: SlotWindow,
    pub from: NaiveDate,
}

/// Handler bulk-generating empty slots.
///
/// Safe to run daily: slots whose `(date, start_time)` key already exists
/// are skipped, so live occupancy counters are never reset.
pub struct GenerateTimeSlotsHandler {
    ledger: Arc<dyn SlotLedger>,
}

impl GenerateTimeSlotsHandler {
    pub fn new(ledger: Arc<dyn SlotLedger>) -> Self {
        Self { ledger }
    }

    /// Returns the number of newly inserted slots.
    pub async fn handle(&self, cmd: GenerateTimeSlotsCommand) -> Result<u64, ReservationError> {
        let slots = cmd.window.generate(cmd.from);
        let inserted = self.ledger.insert_slots(&slots).await?;

        info!(
            from = %cmd.from,
            days = cmd.window.days,
            generated = slots.len(),
            inserted,
            "seeded slot window"
        );

        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemorySlotLedger;
    use crate::ports::SlotLedger as _;

    fn day_one() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()
    }

    #[tokio::test]
    async fn seeds_the_full_default_window() {
        let ledger = Arc::new(InMemorySlotLedger::new());
        let handler = GenerateTimeSlotsHandler::new(ledger.clone());

        let inserted = handler
            .handle(GenerateTimeSlotsCommand {
                window: SlotWindow::default(),
                from: day_one(),
            })
            .await
            .unwrap();

        assert_eq!(inserted, 140);
        assert_eq!(ledger.list_for_date(day_one()).await.unwrap().len(), 20);
    }

    #[tokio::test]
    async fn reseeding_skips_existing_slots_and_keeps_occupancy() {
        let ledger = Arc::new(InMemorySlotLedger::new());
        let handler = GenerateTimeSlotsHandler::new(ledger.clone());
        let cmd = GenerateTimeSlotsCommand {
            window: SlotWindow::default(),
            from: day_one(),
        };

        handler.handle(cmd.clone()).await.unwrap();

        // Book something, then re-seed the same window.
        let slot = ledger
            .find_slot(day_one(), "08:00".parse().unwrap())
            .await
            .unwrap()
            .unwrap();
        assert!(ledger.try_reserve(slot.id).await.unwrap());

        let inserted = handler.handle(cmd).await.unwrap();
        assert_eq!(inserted, 0);

        let after = ledger
            .find_slot(day_one(), "08:00".parse().unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(after.current_reservations, 1);
    }

    #[tokio::test]
    async fn a_rolled_window_adds_only_the_new_days() {
        let ledger = Arc::new(InMemorySlotLedger::new());
        let handler = GenerateTimeSlotsHandler::new(ledger.clone());

        handler
            .handle(GenerateTimeSlotsCommand {
                window: SlotWindow::default(),
                from: day_one(),
            })
            .await
            .unwrap();

        // The next day the window starts one day later: six days overlap,
        // one is new.
        let inserted = handler
            .handle(GenerateTimeSlotsCommand {
                window: SlotWindow::default(),
                from: day_one() + chrono::Duration::days(1),
            })
            .await
            .unwrap();

        assert_eq!(inserted, 20);
    }
}
