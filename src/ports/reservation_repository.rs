//! Reservation repository port (write side).

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ReservationId};
use crate::domain::reservation::Reservation;

/// Persistence for the Reservation aggregate.
///
/// Implementations persist the aggregate with its line items as one unit.
/// Cancellation is an update, never a delete; `delete` exists only for
/// the compensating rollback after a lost ledger race and for the
/// failed-payment sweep.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Saves a new reservation with its line items.
    ///
    /// # Errors
    ///
    /// `DatabaseError` on persistence failure.
    async fn save(&self, reservation: &Reservation) -> Result<(), DomainError>;

    /// Updates an existing reservation (status and payment metadata).
    ///
    /// # Errors
    ///
    /// - `ReservationNotFound` if the reservation doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, reservation: &Reservation) -> Result<(), DomainError>;

    /// Finds a reservation by its id.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &ReservationId) -> Result<Option<Reservation>, DomainError>;

    /// Lists a customer's reservations by email, newest first.
    async fn find_by_email(&self, email: &str) -> Result<Vec<Reservation>, DomainError>;

    /// Physically removes a reservation.
    ///
    /// Used only by the compensating rollback (lost ledger race) and the
    /// failed-payment sweep; the normal lifecycle never deletes.
    ///
    /// # Errors
    ///
    /// - `ReservationNotFound` if the reservation doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn delete(&self, id: &ReservationId) -> Result<(), DomainError>;
}
