//! Reservation-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | BookingWindowExceeded | 400 |
//! | CapacityExceeded | 400 |
//! | SafetyEquipmentMissing | 400 |
//! | SlotUnavailable | 409 |
//! | NotFound | 404 |
//! | ProductNotFound | 404 |
//! | AlreadyCancelled | 409 |
//! | CancellationWindowViolation | 400 |
//! | InvalidTransition | 409 |
//! | Validation | 400 |
//! | Persistence | 500 |

use chrono::NaiveDate;

use crate::domain::foundation::{
    DomainError, ErrorCode, ProductId, ReservationId, StartTime, ValidationError,
};

/// Errors surfaced by the reservation lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum ReservationError {
    /// Requested start lies more than the advance-booking window ahead.
    BookingWindowExceeded,

    /// A line item asks for more people than the product allows.
    CapacityExceeded {
        product: String,
        max_people: u32,
    },

    /// A helmet- or vest-requiring product has too few of them.
    SafetyEquipmentMissing {
        product: String,
        equipment: String,
        required: u32,
    },

    /// Slot missing, not available, or lost to a concurrent booking.
    SlotUnavailable {
        date: NaiveDate,
        start_time: StartTime,
    },

    /// No reservation with this id.
    NotFound(ReservationId),

    /// A referenced product does not exist in the catalog.
    ProductNotFound(ProductId),

    /// The reservation is already cancelled.
    AlreadyCancelled(ReservationId),

    /// Too close to the scheduled start to cancel without penalty.
    CancellationWindowViolation {
        minutes_remaining: i64,
    },

    /// The requested status change is not a legal transition.
    InvalidTransition {
        current: String,
        attempted: String,
    },

    /// Input failed validation before any mutation.
    Validation {
        field: String,
        message: String,
    },

    /// Underlying store failure.
    Persistence(String),
}

impl ReservationError {
    // Constructor functions for cleaner error creation

    pub fn capacity_exceeded(product: impl Into<String>, max_people: u32) -> Self {
        ReservationError::CapacityExceeded {
            product: product.into(),
            max_people,
        }
    }

    pub fn safety_equipment_missing(
        product: impl Into<String>,
        equipment: impl Into<String>,
        required: u32,
    ) -> Self {
        ReservationError::SafetyEquipmentMissing {
            product: product.into(),
            equipment: equipment.into(),
            required,
        }
    }

    pub fn slot_unavailable(date: NaiveDate, start_time: StartTime) -> Self {
        ReservationError::SlotUnavailable { date, start_time }
    }

    pub fn not_found(id: ReservationId) -> Self {
        ReservationError::NotFound(id)
    }

    pub fn product_not_found(id: ProductId) -> Self {
        ReservationError::ProductNotFound(id)
    }

    pub fn already_cancelled(id: ReservationId) -> Self {
        ReservationError::AlreadyCancelled(id)
    }

    pub fn cancellation_window_violation(minutes_remaining: i64) -> Self {
        ReservationError::CancellationWindowViolation { minutes_remaining }
    }

    pub fn invalid_transition(current: impl Into<String>, attempted: impl Into<String>) -> Self {
        ReservationError::InvalidTransition {
            current: current.into(),
            attempted: attempted.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ReservationError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn persistence(message: impl Into<String>) -> Self {
        ReservationError::Persistence(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ReservationError::BookingWindowExceeded => ErrorCode::BookingWindowExceeded,
            ReservationError::CapacityExceeded { .. } => ErrorCode::CapacityExceeded,
            ReservationError::SafetyEquipmentMissing { .. } => ErrorCode::SafetyEquipmentMissing,
            ReservationError::SlotUnavailable { .. } => ErrorCode::SlotUnavailable,
            ReservationError::NotFound(_) => ErrorCode::ReservationNotFound,
            ReservationError::ProductNotFound(_) => ErrorCode::ProductNotFound,
            ReservationError::AlreadyCancelled(_) => ErrorCode::AlreadyCancelled,
            ReservationError::CancellationWindowViolation { .. } => {
                ErrorCode::CancellationWindowViolation
            }
            ReservationError::InvalidTransition { .. } => ErrorCode::InvalidStateTransition,
            ReservationError::Validation { .. } => ErrorCode::ValidationFailed,
            ReservationError::Persistence(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-facing error message.
    pub fn message(&self) -> String {
        match self {
            ReservationError::BookingWindowExceeded => {
                "Reservations can only be made up to 48 hours in advance".to_string()
            }
            ReservationError::CapacityExceeded {
                product,
                max_people,
            } => format!("Product {} allows at most {} people", product, max_people),
            ReservationError::SafetyEquipmentMissing {
                product,
                equipment,
                required,
            } => format!("Product {} requires {} {}", product, required, equipment),
            ReservationError::SlotUnavailable { date, start_time } => format!(
                "The {} slot on {} is no longer available",
                start_time, date
            ),
            ReservationError::NotFound(id) => format!("Reservation not found: {}", id),
            ReservationError::ProductNotFound(id) => format!("Product not found: {}", id),
            ReservationError::AlreadyCancelled(id) => {
                format!("Reservation {} is already cancelled", id)
            }
            ReservationError::CancellationWindowViolation { .. } => {
                "Reservations can only be cancelled more than 2 hours before the scheduled start"
                    .to_string()
            }
            ReservationError::InvalidTransition { current, attempted } => {
                format!("Cannot {} a reservation in {} state", attempted, current)
            }
            ReservationError::Validation { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            ReservationError::Persistence(msg) => format!("Storage error: {}", msg),
        }
    }

    /// Returns true if this error should trigger a retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ReservationError::Persistence(_))
    }
}

impl std::fmt::Display for ReservationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ReservationError {}

impl From<DomainError> for ReservationError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::DatabaseError | ErrorCode::InternalError => {
                ReservationError::Persistence(err.message)
            }
            _ => ReservationError::Validation {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "request".to_string()),
                message: err.message,
            },
        }
    }
}

impl From<ValidationError> for ReservationError {
    fn from(err: ValidationError) -> Self {
        let field = match &err {
            ValidationError::EmptyField { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field.clone(),
        };
        ReservationError::Validation {
            field,
            message: err.to_string(),
        }
    }
}

impl From<ReservationError> for DomainError {
    fn from(err: ReservationError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()
    }

    fn a_time() -> StartTime {
        "09:30".parse().unwrap()
    }

    #[test]
    fn capacity_exceeded_names_the_product_and_limit() {
        let err = ReservationError::capacity_exceeded("jet_ski", 2);
        assert_eq!(err.code(), ErrorCode::CapacityExceeded);
        let msg = err.message();
        assert!(msg.contains("jet_ski"));
        assert!(msg.contains('2'));
    }

    #[test]
    fn safety_equipment_missing_names_the_equipment() {
        let err = ReservationError::safety_equipment_missing("jet_ski", "helmets", 2);
        assert_eq!(err.code(), ErrorCode::SafetyEquipmentMissing);
        assert!(err.message().contains("helmets"));
    }

    #[test]
    fn slot_unavailable_names_the_slot() {
        let err = ReservationError::slot_unavailable(a_date(), a_time());
        assert_eq!(err.code(), ErrorCode::SlotUnavailable);
        let msg = err.message();
        assert!(msg.contains("09:30"));
        assert!(msg.contains("2025-07-01"));
    }

    #[test]
    fn not_found_carries_the_id() {
        let id = ReservationId::new();
        let err = ReservationError::not_found(id);
        assert_eq!(err.code(), ErrorCode::ReservationNotFound);
        assert!(err.message().contains(&id.to_string()));
    }

    #[test]
    fn already_cancelled_maps_to_its_own_code() {
        let err = ReservationError::already_cancelled(ReservationId::new());
        assert_eq!(err.code(), ErrorCode::AlreadyCancelled);
    }

    #[test]
    fn cancellation_window_violation_mentions_the_cutoff() {
        let err = ReservationError::cancellation_window_violation(119);
        assert_eq!(err.code(), ErrorCode::CancellationWindowViolation);
        assert!(err.message().contains("2 hours"));
    }

    #[test]
    fn only_persistence_errors_are_retryable() {
        assert!(ReservationError::persistence("connection reset").is_retryable());
        assert!(!ReservationError::BookingWindowExceeded.is_retryable());
        assert!(!ReservationError::slot_unavailable(a_date(), a_time()).is_retryable());
    }

    #[test]
    fn display_matches_message() {
        let err = ReservationError::BookingWindowExceeded;
        assert_eq!(format!("{}", err), err.message());
    }

    #[test]
    fn converts_to_domain_error_with_matching_code() {
        let err = ReservationError::slot_unavailable(a_date(), a_time());
        let domain: DomainError = err.clone().into();
        assert_eq!(domain.code, err.code());
    }

    #[test]
    fn database_domain_errors_become_persistence() {
        let domain = DomainError::new(ErrorCode::DatabaseError, "pool exhausted");
        let err: ReservationError = domain.into();
        assert!(matches!(err, ReservationError::Persistence(_)));
    }
}
