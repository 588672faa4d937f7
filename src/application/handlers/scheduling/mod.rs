//! Schedule seeding handlers.

mod generate_time_slots;

pub use generate_time_slots::{GenerateTimeSlotsCommand, GenerateTimeSlotsHandler};
