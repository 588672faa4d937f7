//! ListReservationsHandler - query handler for a customer's reservations.

use std::sync::Arc;

use crate::domain::reservation::{Reservation, ReservationError};
use crate::ports::ReservationRepository;

/// Query for a customer's reservations by email.
#[derive(Debug, Clone)]
pub struct ListReservationsQuery {
    pub email: String,
}

/// Handler listing reservations by customer email, newest first.
pub struct ListReservationsHandler {
    repository: Arc<dyn ReservationRepository>,
}

impl ListReservationsHandler {
    pub fn new(repository: Arc<dyn ReservationRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: ListReservationsQuery,
    ) -> Result<Vec<Reservation>, ReservationError> {
        if query.email.trim().is_empty() {
            return Err(ReservationError::validation(
                "email",
                "an email is required to list reservations",
            ));
        }
        Ok(self.repository.find_by_email(&query.email).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryReservationRepository;
    use crate::domain::foundation::{ProductId, ReservationId, SlotId};
    use crate::domain::reservation::{Currency, CustomerContact, LineItem, PaymentMethod};
    use crate::ports::ReservationRepository as _;
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
    async fn lists_only_the_requested_customer() {
        let repo = Arc::new(InMemoryReservationRepository::new());
        repo.save(&reservation_for("ana@example.com")).await.unwrap();
        repo.save(&reservation_for("ana@example.com")).await.unwrap();
        repo.save(&reservation_for("bruno@example.com")).await.unwrap();

        let handler = ListReservationsHandler::new(repo);
        let found = handler
            .handle(ListReservationsQuery {
                email: "ana@example.com".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|r| r.customer.email == "ana@example.com"));
    }

    #[tokio::test]
    async fn unknown_email_yields_an_empty_list() {
        let repo = Arc::new(InMemoryReservationRepository::new());
        let handler = ListReservationsHandler::new(repo);

        let found = handler
            .handle(ListReservationsQuery {
                email: "nobody@example.com".to_string(),
            })
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn blank_email_is_rejected() {
        let repo = Arc::new(InMemoryReservationRepository::new());
        let handler = ListReservationsHandler::new(repo);

        let result = handler
            .handle(ListReservationsQuery {
                email: "   ".to_string(),
            })
            .await;
        assert!(matches!(result, Err(ReservationError::Validation { .. })));
    }
}
