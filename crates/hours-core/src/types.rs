//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// The hourly rate was negative, infinite or NaN.
    #[error("hourly rate must be a finite, non-negative number, got {value}")]
    RateOutOfRange { value: f64 },

    /// The month text was not `YYYY-MM`.
    #[error("invalid month {value:?}: expected YYYY-MM")]
    InvalidMonth { value: String },

    /// The month number was outside 1-12, or the year outside the calendar range.
    #[error("month {year}-{month} is out of range")]
    MonthOutOfRange { year: i32, month: u32 },
}

/// A billing rate per hour.
///
/// Always finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct HourlyRate(f64);

impl HourlyRate {
    /// Creates a rate after validation.
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() || value < 0.0 {
            return Err(ValidationError::RateOutOfRange { value });
        }
        Ok(Self(value))
    }

    /// Returns the inner f64 value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Billing amount for `hours`.
    #[must_use]
    pub fn amount(self, hours: f64) -> f64 {
        self.0 * hours
    }
}

impl fmt::Display for HourlyRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}


impl Serialize for HourlyRate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for HourlyRate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}
