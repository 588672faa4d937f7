//! ListAvailableTimesHandler - query handler for a day's free start times.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::{StartTime, Timestamp};
use crate::domain::reservation::{check_booking_window, ReservationError};
use crate::ports::SlotLedger;

/// Query for the bookable start times on a given day.
#[derive(Debug, Clone)]
pub struct ListAvailableTimesQuery {
    pub date: NaiveDate,
}

/// Handler listing start times with spare capacity.
///
/// The advance-booking window applies to the query too: asking for a day
/// that opens beyond the window is rejected rather than answered with
/// times nobody could book.
pub struct ListAvailableTimesHandler {
    ledger: Arc<dyn SlotLedger>,
}

impl ListAvailableTimesHandler {
    pub fn new(ledger: Arc<dyn SlotLedger>) -> Self {
        Self { ledger }
    }

    pub async fn handle(
        &self,
        query: ListAvailableTimesQuery,
    ) -> Result<Vec<StartTime>, ReservationError> {
        // The day is inside the window if its very first instant is.
        let day_start = StartTime::new(0, 0)
            .expect("midnight is always valid")
            .on_date(query.date);
        check_booking_window(day_start, Timestamp::now())?;

        let slots = self.ledger.list_for_date(query.date).await?;

        Ok(slots
            .iter()
            .filter(|slot| slot.is_available && slot.has_capacity())
            .map(|slot| slot.start_time)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemorySlotLedger;
    use crate::domain::scheduling::{SlotWindow, TimeSlot};
    use crate::ports::SlotLedger as _;

    fn today() -> NaiveDate {
        Timestamp::now().as_datetime().date_naive()
    }

    #[tokio::test]
    async fn lists_every_open_slot_in_order() {
        let slots = SlotWindow::default().generate(today());
        let ledger = Arc::new(InMemorySlotLedger::with_slots(slots));

        let handler = ListAvailableTimesHandler::new(ledger);
        let times = handler
            .handle(ListAvailableTimesQuery { date: today() })
            .await
            .unwrap();

        assert_eq!(times.len(), 20);
        assert_eq!(times.first().unwrap().to_string(), "08:00");
        assert_eq!(times.last().unwrap().to_string(), "17:30");
    }

    #[tokio::test]
    async fn full_slots_are_omitted() {
        let mut slot = TimeSlot::new(today(), "09:00".parse().unwrap(), 30, 1);
        assert!(slot.try_reserve());
        let open = TimeSlot::new(today(), "09:30".parse().unwrap(), 30, 1);
        let ledger = Arc::new(InMemorySlotLedger::with_slots(vec![slot, open]));

        let handler = ListAvailableTimesHandler::new(ledger);
        let times = handler
            .handle(ListAvailableTimesQuery { date: today() })
            .await
            .unwrap();

        assert_eq!(times.len(), 1);
        assert_eq!(times[0].to_string(), "09:30");
    }

    #[tokio::test]
    async fn a_day_beyond_the_window_is_rejected() {
        let ledger = Arc::new(InMemorySlotLedger::new());
        let handler = ListAvailableTimesHandler::new(ledger);

        let far = today() + chrono::Duration::days(5);
        let result = handler.handle(ListAvailableTimesQuery { date: far }).await;

        assert_eq!(result.unwrap_err(), ReservationError::BookingWindowExceeded);
    }

    #[tokio::test]
    async fn a_day_with_no_slots_yields_an_empty_list() {
        let ledger = Arc::new(InMemorySlotLedger::new());
        let handler = ListAvailableTimesHandler::new(ledger);

        let times = handler
            .handle(ListAvailableTimesQuery { date: today() })
            .await
            .unwrap();
        assert!(times.is_empty());
    }

    #[tokio::test]
    async fn released_capacity_reappears_in_the_listing() {
        let mut slot = TimeSlot::new(today(), "09:00".parse().unwrap(), 30, 1);
        assert!(slot.try_reserve());
        let slot_id = slot.id;
        let ledger = Arc::new(InMemorySlotLedger::with_slots(vec![slot]));

        let handler = ListAvailableTimesHandler::new(ledger.clone());
        assert!(handler
            .handle(ListAvailableTimesQuery { date: today() })
            .await
            .unwrap()
            .is_empty());

        ledger.release(slot_id).await.unwrap();
        let times = handler
            .handle(ListAvailableTimesQuery { date: today() })
            .await
            .unwrap();
        assert_eq!(times.len(), 1);
    }
}
