//! Core domain logic for calendar hour aggregation.
//!
//! This crate contains:
//! - Splitting: cutting an event's time range into per-day chunks
//! - Aggregation: filtering raw calendar events by title and totalling hours
//! - Months and rates: the reporting window and the billing multiplier
//!
//! Nothing here reads the ambient time zone; callers pass one explicitly.

mod aggregate;
mod chunk;
mod event;
pub mod month;
pub mod types;

pub use aggregate::{aggregate_hours, event_chunks, total_hours};
pub use chunk::{
    EventChunk, InvertedInterval, elapsed_hours, hour_of_day, split_into_days, start_of_day,
};
pub use event::{AggregateError, Boundary, EventTime, RawEvent};
pub use month::Month;
pub use types::{HourlyRate, ValidationError};
