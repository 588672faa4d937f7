//! Ports - contracts between the application core and the outside world.
//!
//! Adapters implement these traits; handlers depend only on the traits.

mod event_publisher;
mod product_catalog;
mod reservation_repository;
mod slot_ledger;

pub use event_publisher::EventPublisher;
pub use product_catalog::ProductCatalog;
pub use reservation_repository::ReservationRepository;
pub use slot_ledger::SlotLedger;
