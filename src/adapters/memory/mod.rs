//! In-memory implementations of the ports.
//!
//! First-class adapters, not test doubles: they back local development
//! runs and the concurrency property tests. Each guards its state with a
//! mutex held only for the duration of one mutation, which gives the same
//! observable atomicity the Postgres adapter gets from conditional
//! updates.

mod event_publisher;
mod product_catalog;
mod reservation_repository;
mod slot_ledger;

pub use event_publisher::InMemoryEventPublisher;
pub use product_catalog::InMemoryProductCatalog;
pub use reservation_repository::InMemoryReservationRepository;
pub use slot_ledger::InMemorySlotLedger;
