//! Booking-window and cancellation policies.
//!
//! Both policies compare the reservation's scheduled start, composed in
//! UTC from its date and `"HH:MM"` start time, against an injected "now".
//! Comparisons run at full duration precision; truncating to whole hours
//! would misclassify starts near the boundary.

use chrono::Duration;

use crate::domain::foundation::Timestamp;
use crate::domain::reservation::ReservationError;

/// How far ahead a reservation may be placed, in hours.
pub const MAX_ADVANCE_HOURS: i64 = 48;

/// Minimum remaining time before start for a penalty-free cancellation,
/// in hours. The boundary itself blocks: exactly two hours out is too late.
pub const CANCELLATION_CUTOFF_HOURS: i64 = 2;

/// Rejects requests whose scheduled start lies beyond the advance window.
pub fn check_booking_window(
    scheduled_start: Timestamp,
    now: Timestamp,
) -> Result<(), ReservationError> {
    if scheduled_start.duration_since(&now) > Duration::hours(MAX_ADVANCE_HOURS) {
        return Err(ReservationError::BookingWindowExceeded);
    }
    Ok(())
}

/// Decides whether a reservation may still be cancelled without penalty.
///
/// Permitted only while strictly more than [`CANCELLATION_CUTOFF_HOURS`]
/// remain until the scheduled start.
pub fn check_cancellation_window(
    scheduled_start: Timestamp,
    now: Timestamp,
) -> Result<(), ReservationError> {
    let remaining = scheduled_start.duration_since(&now);
    if remaining <= Duration::hours(CANCELLATION_CUTOFF_HOURS) {
        return Err(ReservationError::cancellation_window_violation(
            remaining.num_minutes(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_47_hours_ahead_is_inside_the_window() {
        let now = Timestamp::now();
        assert!(check_booking_window(now.plus_hours(47), now).is_ok());
    }

    #[test]
    fn booking_49_hours_ahead_is_rejected() {
        let now = Timestamp::now();
        let result = check_booking_window(now.plus_hours(49), now);
        assert_eq!(result, Err(ReservationError::BookingWindowExceeded));
    }

    #[test]
    fn booking_exactly_48_hours_ahead_is_allowed() {
        let now = Timestamp::now();
        assert!(check_booking_window(now.plus_hours(48), now).is_ok());
    }

    #[test]
    fn booking_in_the_past_is_inside_the_window() {
        // The advance window only bounds the future side; same-day walk-ups
        // for slots already underway are the front desk's problem.
        let now = Timestamp::now();
        assert!(check_booking_window(now.minus_hours(1), now).is_ok());
    }

    #[test]
    fn cancelling_two_hours_one_minute_out_is_permitted() {
        let now = Timestamp::now();
        let start = now.plus_hours(2).plus_minutes(1);
        assert!(check_cancellation_window(start, now).is_ok());
    }

    #[test]
    fn cancelling_one_hour_fifty_nine_out_is_rejected() {
        let now = Timestamp::now();
        let start = now.plus_hours(1).plus_minutes(59);
        let result = check_cancellation_window(start, now);
        assert!(matches!(
            result,
            Err(ReservationError::CancellationWindowViolation { .. })
        ));
    }

    #[test]
    fn cancelling_exactly_two_hours_out_is_rejected() {
        let now = Timestamp::now();
        let result = check_cancellation_window(now.plus_hours(2), now);
        assert!(matches!(
            result,
            Err(ReservationError::CancellationWindowViolation { .. })
        ));
    }

    #[test]
    fn violation_reports_remaining_minutes() {
        let now = Timestamp::now();
        let start = now.plus_minutes(90);
        match check_cancellation_window(start, now) {
            Err(ReservationError::CancellationWindowViolation { minutes_remaining }) => {
                assert_eq!(minutes_remaining, 90);
            }
            other => panic!("expected window violation, got {:?}", other),
        }
    }

    #[test]
    fn cancelling_after_the_start_is_rejected() {
        let now = Timestamp::now();
        let result = check_cancellation_window(now.minus_hours(1), now);
        assert!(matches!(
            result,
            Err(ReservationError::CancellationWindowViolation { .. })
        ));
    }
}
