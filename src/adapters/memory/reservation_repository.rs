//! In-memory implementation of the reservation repository.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::foundation::{DomainError, ErrorCode, ReservationId};
use crate::domain::reservation::Reservation;
use crate::ports::ReservationRepository;

/// Mutex-guarded reservation store.
pub struct InMemoryReservationRepository {
    reservations: Mutex<Vec<Reservation>>,
}

impl InMemoryReservationRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self {
            reservations: Mutex::new(Vec::new()),
        }
    }

    /// Creates a repository pre-loaded with one reservation.
    pub fn with_reservation(reservation: Reservation) -> Self {
        Self {
            reservations: Mutex::new(vec![reservation]),
        }
    }

    /// Number of stored reservations, for assertions.
    pub fn len(&self) -> usize {
        self.reservations.lock().unwrap().len()
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryReservationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReservationRepository for InMemoryReservationRepository {
    async fn save(&self, reservation: &Reservation) -> Result<(), DomainError> {
        let mut reservations = self.reservations.lock().unwrap();
        if reservations.iter().any(|r| r.id == reservation.id) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "Duplicate reservation id",
            ));
        }
        reservations.push(reservation.clone());
        Ok(())
    }

    async fn update(&self, reservation: &Reservation) -> Result<(), DomainError> {
        let mut reservations = self.reservations.lock().unwrap();
        match reservations.iter_mut().find(|r| r.id == reservation.id) {
            Some(stored) => {
                *stored = reservation.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::ReservationNotFound,
                "Reservation not found",
            )),
        }
    }

    async fn find_by_id(&self, id: &ReservationId) -> Result<Option<Reservation>, DomainError> {
        let reservations = self.reservations.lock().unwrap();
        Ok(reservations.iter().find(|r| &r.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Vec<Reservation>, DomainError> {
        let reservations = self.reservations.lock().unwrap();
        let mut matching: Vec<Reservation> = reservations
            .iter()
            .filter(|r| r.customer.email == email)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }

    async fn delete(&self, id: &ReservationId) -> Result<(), DomainError> {
        let mut reservations = self.reservations.lock().unwrap();
        let before = reservations.len();
        reservations.retain(|r| &r.id != id);
        if reservations.len() == before {
            return Err(DomainError::new(
                ErrorCode::ReservationNotFound,
                "Reservation not found",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ProductId, SlotId};
    use crate::domain::reservation::{
        Currency, CustomerContact, LineItem, PaymentMethod,
    };
    use chrono::NaiveDate;

    fn reservation_for(email: &str) -> Reservation {
        Reservation::create(
            ReservationId::new(),
            CustomerContact::new("Ana Costa", email, "+54 11 5555 0101").unwrap(),
            NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            "10:00".parse().unwrap(),
            SlotId::new(),
            vec![LineItem::new(ProductId::new(), 1, 1, 0, 0).unwrap()],
            40.0,
            PaymentMethod::Card,
            Currency::Local,
            false,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn save_then_find_by_id() {
        let repo = InMemoryReservationRepository::new();
        let r = reservation_for("ana@example.com");

        repo.save(&r).await.unwrap();
        let found = repo.find_by_id(&r.id).await.unwrap();
        assert_eq!(found, Some(r));
    }

    #[tokio::test]
    async fn save_rejects_duplicate_ids() {
        let repo = InMemoryReservationRepository::new();
        let r = reservation_for("ana@example.com");

        repo.save(&r).await.unwrap();
        assert!(repo.save(&r).await.is_err());
    }

    #[tokio::test]
    async fn update_replaces_the_stored_aggregate() {
        let repo = InMemoryReservationRepository::new();
        let mut r = reservation_for("ana@example.com");
        repo.save(&r).await.unwrap();

        r.cancel().unwrap();
        repo.update(&r).await.unwrap();

        let found = repo.find_by_id(&r.id).await.unwrap().unwrap();
        assert!(!found.holds_slot());
    }

    #[tokio::test]
    async fn update_of_unknown_reservation_fails() {
        let repo = InMemoryReservationRepository::new();
        let r = reservation_for("ana@example.com");
        let err = repo.update(&r).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ReservationNotFound);
    }

    #[tokio::test]
    async fn find_by_email_filters_and_sorts_newest_first() {
        let repo = InMemoryReservationRepository::new();
        let older = reservation_for("ana@example.com");
        repo.save(&older).await.unwrap();

        let newer = reservation_for("ana@example.com");
        repo.save(&newer).await.unwrap();
        repo.save(&reservation_for("bruno@example.com")).await.unwrap();

        let found = repo.find_by_email("ana@example.com").await.unwrap();
        assert_eq!(found.len(), 2);
        assert!(found[0].created_at >= found[1].created_at);
    }

    #[tokio::test]
    async fn delete_removes_the_reservation() {
        let repo = InMemoryReservationRepository::new();
        let r = reservation_for("ana@example.com");
        repo.save(&r).await.unwrap();

        repo.delete(&r.id).await.unwrap();
        assert!(repo.is_empty());
        assert!(repo.delete(&r.id).await.is_err());
    }
}
