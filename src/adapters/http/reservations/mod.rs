//! HTTP surface for the reservation module.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::ReservationsAppState;
pub use routes::api_router;
