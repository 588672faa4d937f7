//! Axum router configuration for the reservation endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{
    cancel_reservation, create_reservation, get_reservation, handle_payment_event, health,
    list_available_times, list_products, list_reservations, ReservationsAppState,
};

/// Create the reservation API router.
///
/// # Routes
///
/// - `GET  /products` - catalog listing
/// - `GET  /available-times?date=` - free start times for a day
/// - `POST /reservations` - create a reservation
/// - `GET  /reservations?email=` - a customer's reservations
/// - `GET  /reservations/:id` - one reservation
/// - `PUT  /reservations/:id/cancel` - cancel a reservation
/// - `POST /payment-events` - payment gateway notification intake
pub fn reservation_routes() -> Router<ReservationsAppState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/available-times", get(list_available_times))
        .route(
            "/reservations",
            post(create_reservation).get(list_reservations),
        )
        .route("/reservations/:id", get(get_reservation))
        .route("/reservations/:id/cancel", put(cancel_reservation))
        .route("/payment-events", post(handle_payment_event))
}

/// Create the complete application router.
///
/// Mounts the reservation routes under `/api` and exposes the liveness
/// probe at `/health`.
pub fn api_router() -> Router<ReservationsAppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/api", reservation_routes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryEventPublisher, InMemoryProductCatalog, InMemoryReservationRepository,
        InMemorySlotLedger,
    };
    use std::sync::Arc;

    fn test_state() -> ReservationsAppState {
        ReservationsAppState {
            catalog: Arc::new(InMemoryProductCatalog::seeded()),
            ledger: Arc::new(InMemorySlotLedger::new()),
            repository: Arc::new(InMemoryReservationRepository::new()),
            event_publisher: Arc::new(InMemoryEventPublisher::new()),
        }
    }

    #[test]
    fn reservation_routes_creates_router() {
        let router = reservation_routes();
        let _: Router<()> = router.with_state(test_state());
    }

    #[test]
    fn api_router_creates_combined_router() {
        let router = api_router();
        let _: Router<()> = router.with_state(test_state());
    }
}
