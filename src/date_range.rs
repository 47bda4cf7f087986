// Half-open stay intervals: a guest occupies the room from check-in up to, but not
// including, the check-out day.

use std::fmt;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::reservation_store::ReservationError;

// Format the menu layer collects dates in (yyyy/MM/dd)
pub const DEFAULT_DATE_FORMAT: &str = "%Y/%m/%d";

/// A `[check_in, check_out)` interval with `check_in < check_out`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

// Wire shape; ordering is checked on the way in
#[derive(Deserialize)]
struct RawDateRange {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = ReservationError;

    fn try_from(raw: RawDateRange) -> Result<Self, Self::Error> {
        DateRange::new(raw.check_in, raw.check_out)
    }
}

impl DateRange {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, ReservationError> {
        if check_in >= check_out {
            return Err(ReservationError::InvalidDateRange {
                check_in,
                check_out,
            });
        }

        Ok(Self {
            check_in,
            check_out,
        })
    }

    // Parse both ends with a chrono format string, then validate ordering
    pub fn parse(check_in: &str, check_out: &str, format: &str) -> Result<Self, ReservationError> {
        let check_in = NaiveDate::parse_from_str(check_in.trim(), format)?;
        let check_out = NaiveDate::parse_from_str(check_out.trim(), format)?;

        Self::new(check_in, check_out)
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Two half-open ranges overlap iff each one starts before the other ends.
    /// Touching ranges (one's check-out equals the other's check-in) do not overlap.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }

    // Move both ends by the same signed number of days
    pub fn shifted(&self, days: i64) -> Result<Self, ReservationError> {
        let shift = |date: NaiveDate| {
            let step = Days::new(days.unsigned_abs());
            if days >= 0 {
                date.checked_add_days(step)
            } else {
                date.checked_sub_days(step)
            }
        };

        match (shift(self.check_in), shift(self.check_out)) {
            (Some(check_in), Some(check_out)) => Self::new(check_in, check_out),
            _ => Err(ReservationError::ShiftOutOfRange { dates: *self, days }),
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.check_in, self.check_out)
    }
}
