//! Calendar months and their local-time windows.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Months, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use crate::chunk::start_of_day;
use crate::types::ValidationError;

/// A calendar month, written `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    // Always the first of the month.
    first_day: NaiveDate,
}

impl Month {
    /// Creates a month after validation.
    pub fn new(year: i32, month: u32) -> Result<Self, ValidationError> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first_day| Self { first_day })
            .ok_or(ValidationError::MonthOutOfRange { year, month })
    }

    /// The month a date falls in.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first_day: date.with_day(1).unwrap_or(date),
        }
    }

    #[must_use]
    pub fn year(self) -> i32 {
        self.first_day.year()
    }

    #[must_use]
    pub fn month(self) -> u32 {
        self.first_day.month()
    }

    #[must_use]
    pub const fn first_day(self) -> NaiveDate {
        self.first_day
    }

    /// Moves `delta` months forward (or backward when negative).
    ///
    /// Returns `None` past the end of the supported calendar.
    pub fn add_months(self, delta: i32) -> Option<Self> {
        let step = Months::new(delta.unsigned_abs());
        let first_day = if delta >= 0 {
            self.first_day.checked_add_months(step)
        } else {
            self.first_day.checked_sub_months(step)
        }?;
        Some(Self { first_day })
    }

    pub fn next(self) -> Option<Self> {
        self.add_months(1)
    }

    /// Half-open date window `[first day, first day of next month)`.
    ///
    /// The last supported month ends at `NaiveDate::MAX`.
    pub fn window(self) -> (NaiveDate, NaiveDate) {
        let end = self.next().map_or(NaiveDate::MAX, Self::first_day);
        (self.first_day, end)
    }

    /// The window's boundaries as local-midnight instants in `tz`.
    pub fn bounds<Tz: TimeZone>(self, tz: &Tz) -> (DateTime<Tz>, DateTime<Tz>) {
        let (start, end) = self.window();
        (start_of_day(tz, start), start_of_day(tz, end))
    }

    /// Whether `[start, end)` touches this month in `tz`.
    ///
    /// Zero-length ranges count when they sit inside the window.
    pub fn overlaps<Tz: TimeZone>(self, start: &DateTime<Tz>, end: &DateTime<Tz>, tz: &Tz) -> bool {
        let (window_start, window_end) = self.bounds(tz);
        *start < window_end && (*end > window_start || *start >= window_start)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for Month {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidMonth {
            value: s.to_string(),
        };
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

impl Serialize for Month {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Month {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
