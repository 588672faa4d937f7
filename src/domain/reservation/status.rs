//! Reservation status state machine.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Current state of a reservation in the booking lifecycle.
///
/// The initial state depends on the payment method: card and transfer
/// payments are treated as pre-authorized and enter `Confirmed` directly;
/// cash enters `Pending` until the payment gateway confirms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    /// Awaiting payment confirmation. Holds its slot.
    Pending,

    /// Paid (or pre-authorized). Holds its slot.
    Confirmed,

    /// Cancelled by the customer or swept after a failed payment.
    /// Terminal; the slot has been released.
    Cancelled,
}

impl StateMachine for ReservationStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ReservationStatus::*;
        matches!(
            (self, target),
            // Payment confirmation event
            (Pending, Confirmed)
            // Cancellation, from either live state
                | (Pending, Cancelled)
                | (Confirmed, Cancelled)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ReservationStatus::*;
        match self {
            Pending => vec![Confirmed, Cancelled],
            Confirmed => vec![Cancelled],
            Cancelled => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_can_be_confirmed() {
        let status = ReservationStatus::Pending;
        assert_eq!(
            status.transition_to(ReservationStatus::Confirmed),
            Ok(ReservationStatus::Confirmed)
        );
    }

    #[test]
    fn pending_can_be_cancelled() {
        let status = ReservationStatus::Pending;
        assert_eq!(
            status.transition_to(ReservationStatus::Cancelled),
            Ok(ReservationStatus::Cancelled)
        );
    }

    #[test]
    fn confirmed_can_be_cancelled() {
        let status = ReservationStatus::Confirmed;
        assert_eq!(
            status.transition_to(ReservationStatus::Cancelled),
            Ok(ReservationStatus::Cancelled)
        );
    }

    #[test]
    fn confirmed_cannot_revert_to_pending() {
        let status = ReservationStatus::Confirmed;
        assert!(status.transition_to(ReservationStatus::Pending).is_err());
    }

    #[test]
    fn cancelled_is_terminal() {
        let status = ReservationStatus::Cancelled;
        assert!(status.is_terminal());
        assert!(status.transition_to(ReservationStatus::Pending).is_err());
        assert!(status.transition_to(ReservationStatus::Confirmed).is_err());
    }

    #[test]
    fn valid_transitions_are_consistent_with_can_transition_to() {
        for status in [
            ReservationStatus::Pending,
            ReservationStatus::Confirmed,
            ReservationStatus::Cancelled,
        ] {
            for target in status.valid_transitions() {
                assert!(
                    status.can_transition_to(&target),
                    "can_transition_to should return true for {:?} -> {:?}",
                    status,
                    target
                );
            }
        }
    }
}
