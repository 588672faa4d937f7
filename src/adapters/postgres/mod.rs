//! PostgreSQL implementations of the store ports.

mod pool;
mod product_catalog;
mod reservation_repository;
mod slot_ledger;

pub use pool::connect;
pub use product_catalog::PostgresProductCatalog;
pub use reservation_repository::PostgresReservationRepository;
pub use slot_ledger::PostgresSlotLedger;
