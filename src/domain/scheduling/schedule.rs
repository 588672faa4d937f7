//! Rolling-window slot generation.

use chrono::{Duration, NaiveDate};

use crate::domain::foundation::{StartTime, ValidationError};
use crate::domain::scheduling::TimeSlot;

/// Parameters for bulk-generating the bookable schedule.
///
/// The seeding process regenerates a rolling window of empty slots:
/// `days` consecutive calendar days, each covering business hours
/// `[open_hour, close_hour)` in steps of `slot_minutes`, every slot
/// starting empty with `capacity` units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotWindow {
    pub days: u32,
    pub open_hour: u8,
    pub close_hour: u8,
    pub slot_minutes: u16,
    pub capacity: u32,
}

impl SlotWindow {
    /// Creates a validated window.
    pub fn new(
        days: u32,
        open_hour: u8,
        close_hour: u8,
        slot_minutes: u16,
        capacity: u32,
    ) -> Result<Self, ValidationError> {
        if days == 0 {
            return Err(ValidationError::out_of_range("days", 1, 365, 0));
        }
        if close_hour > 24 || open_hour >= close_hour {
            return Err(ValidationError::invalid_format(
                "business_hours",
                format!("open {:02}:00 must precede close {:02}:00", open_hour, close_hour),
            ));
        }
        if slot_minutes == 0 || slot_minutes > 60 {
            return Err(ValidationError::out_of_range(
                "slot_minutes",
                1,
                60,
                i32::from(slot_minutes),
            ));
        }
        Ok(Self {
            days,
            open_hour,
            close_hour,
            slot_minutes,
            capacity,
        })
    }

    /// Generates every slot in the window starting from `from` (inclusive).
    ///
    /// Slots are produced in chronological order. Dates are plain UTC
    /// calendar days; no timezone offset is ever applied.
    pub fn generate(&self, from: NaiveDate) -> Vec<TimeSlot> {
        let mut slots = Vec::new();

        for day in 0..self.days {
            let date = from + Duration::days(i64::from(day));

            for hour in self.open_hour..self.close_hour {
                let mut minute: u16 = 0;
                while minute < 60 {
                    let start_time = StartTime::new(hour, minute as u8)
                        .expect("generated hour/minute are always in range");
                    slots.push(TimeSlot::new(
                        date,
                        start_time,
                        self.slot_minutes,
                        self.capacity,
                    ));
                    minute += self.slot_minutes;
                }
            }
        }

        slots
    }
}

impl Default for SlotWindow {
    /// The operation's standard schedule: 7 days, 08:00-18:00,
    /// 30-minute slots, 10 units each.
    fn default() -> Self {
        Self {
            days: 7,
            open_hour: 8,
            close_hour: 18,
            slot_minutes: 30,
            capacity: 10,
        }
    }
}
