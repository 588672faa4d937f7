//! Scheduling module - bookable time slots and their generation.

mod schedule;
mod time_slot;

pub use schedule::SlotWindow;
pub use time_slot::TimeSlot;
