//! Reservation lifecycle handlers.

mod cancel_reservation;
mod create_reservation;
mod expire_pending_reservation;
mod get_reservation;
mod handle_payment_event;
mod list_available_times;
mod list_reservations;

pub use cancel_reservation::{
    CancelReservationCommand, CancelReservationHandler, CancelReservationResult,
};
pub use create_reservation::{
    CreateReservationCommand, CreateReservationHandler, CreateReservationResult,
};
pub use expire_pending_reservation::{
    ExpirePendingReservationCommand, ExpirePendingReservationHandler, SweepOutcome,
};
pub use get_reservation::{GetReservationHandler, GetReservationQuery};
pub use handle_payment_event::{
    HandlePaymentEventHandler, PaymentEventCommand, PaymentEventOutcome, PaymentOutcome,
};
pub use list_available_times::{ListAvailableTimesHandler, ListAvailableTimesQuery};
pub use list_reservations::{ListReservationsHandler, ListReservationsQuery};
