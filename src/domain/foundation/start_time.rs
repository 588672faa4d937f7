//! Wall-clock start time value object.

use chrono::{NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{Timestamp, ValidationError};

/// Wall-clock time of day in `"HH:MM"` form, as printed on the slot board.
///
/// Slots are keyed by `(date, start_time)`. The time of day carries no
/// timezone of its own; combining it with a date always happens in UTC via
/// [`StartTime::on_date`], so the booking-window and cancellation math can
/// never drift with the server's local zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StartTime {
    hour: u8,
    minute: u8,
}

impl StartTime {
    /// Creates a start time from hour and minute components.
    pub fn new(hour: u8, minute: u8) -> Result<Self, ValidationError> {
        if hour > 23 {
            return Err(ValidationError::out_of_range("hour", 0, 23, i32::from(hour)));
        }
        if minute > 59 {
            return Err(ValidationError::out_of_range(
                "minute",
                0,
                59,
                i32::from(minute),
            ));
        }
        Ok(Self { hour, minute })
    }

    /// Hour component (0-23).
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// Minute component (0-59).
    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Composes this wall-clock time with a calendar date, in UTC.
    ///
    /// This is the single composition point mandated for all scheduling
    /// arithmetic (booking window, cancellation window, cash payment due).
    pub fn on_date(&self, date: NaiveDate) -> Timestamp {
        let dt = date
            .and_hms_opt(u32::from(self.hour), u32::from(self.minute), 0)
            .expect("validated hour/minute always compose");
        Timestamp::from_datetime(Utc.from_utc_datetime(&dt))
    }
}

impl fmt::Display for StartTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for StartTime {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (h, m) = s
            .split_once(':')
            .ok_or_else(|| ValidationError::invalid_format("start_time", "expected \"HH:MM\""))?;

        let hour: u8 = h
            .parse()
            .map_err(|_| ValidationError::invalid_format("start_time", "hour is not a number"))?;
        let minute: u8 = m
            .parse()
            .map_err(|_| ValidationError::invalid_format("start_time", "minute is not a number"))?;

        Self::new(hour, minute)
    }
}

impl TryFrom<String> for StartTime {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<StartTime> for String {
    fn from(t: StartTime) -> Self {
        t.to_string()
    }
}
