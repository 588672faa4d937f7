//! State machine trait for status enums.
//!
//! Provides a consistent interface for validating and performing state
//! transitions on entity lifecycle statuses.

use super::ValidationError;

/// Trait for status enums that represent state machines.
///
/// Implementors define valid state transitions and get validated
/// transition methods for free.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for ReservationStatus {
///     fn can_transition_to(&self, target: &Self) -> bool {
///         matches!(
///             (self, target),
///             (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Cancelled)
///         )
///     }
///
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             Pending => vec![Confirmed, Cancelled],
///             Confirmed => vec![Cancelled],
///             Cancelled => vec![],
///         }
///     }
/// }
///
/// // Usage:
/// let new_status = reservation.status.transition_to(ReservationStatus::Cancelled)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    ///
    /// This is the preferred way to change state, as it ensures
    /// the transition is valid according to the state machine rules.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Miniature lifecycle used to exercise the trait defaults.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum HoldStatus {
        Open,
        Held,
        Settled,
    }

    impl StateMachine for HoldStatus {
        fn can_transition_to(&self, target: &Self) -> bool {
            use HoldStatus::*;
            matches!((self, target), (Open, Held) | (Held, Settled) | (Held, Open))
        }

        fn valid_transitions(&self) -> Vec<Self> {
            use HoldStatus::*;
            match self {
                Open => vec![Held],
                Held => vec![Settled, Open],
                Settled => vec![],
            }
        }
    }

    #[test]
    fn transition_to_succeeds_for_valid_transition() {
        let result = HoldStatus::Open.transition_to(HoldStatus::Held);
        assert_eq!(result, Ok(HoldStatus::Held));
    }

    #[test]
    fn transition_to_fails_for_invalid_transition() {
        let result = HoldStatus::Open.transition_to(HoldStatus::Settled);
        assert!(result.is_err());
    }

    #[test]
    fn terminal_state_has_no_transitions() {
        assert!(HoldStatus::Settled.is_terminal());
        assert!(!HoldStatus::Open.is_terminal());
        assert!(!HoldStatus::Held.is_terminal());
    }

    #[test]
    fn can_transition_to_is_consistent_with_valid_transitions() {
        for status in [HoldStatus::Open, HoldStatus::Held, HoldStatus::Settled] {
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
