//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the Marea booking domain.

mod errors;
mod events;
mod ids;
mod start_time;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{DomainEvent, EventEnvelope, EventId, SerializableDomainEvent};
pub use ids::{ProductId, ReservationId, SlotId};
pub use start_time::StartTime;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
