//! Splitting a time range into per-day chunks.
//!
//! An event that crosses local midnight is cut at every midnight it spans, so
//! each calendar day gets its own [`EventChunk`]. Durations always come from
//! the real elapsed time between instants, never from subtracting hour-of-day
//! values, so a DST transition inside a chunk is accounted for exactly.

use chrono::{
    DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset,
    TimeZone, Timelike,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const MS_PER_HOUR: f64 = 3_600_000.0;

/// One calendar day's slice of a single event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventChunk {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// Fractional hour-of-day at which the event is present from.
    pub start: f64,
    /// Fractional hour-of-day at which it stops; `24.0` when it runs past midnight.
    pub end: f64,
    /// Real elapsed hours within this day.
    pub hours: f64,
}

/// The end of a range precedes its start.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("interval ends at {end} before it starts at {start}")]
pub struct InvertedInterval {
    /// Local wall-clock start.
    pub start: NaiveDateTime,
    /// Local wall-clock end.
    pub end: NaiveDateTime,
}

/// Splits `[start, end)` into one chunk per local calendar day.
///
/// Both instants must be expressed in the zone whose midnights should cut the
/// range. The result is never empty: a zero-length range yields a single
/// zero-hour chunk. A range ending exactly on a midnight reached by the walk
/// does not produce a trailing empty chunk for the following day.
pub fn split_into_days<Tz: TimeZone>(
    start: &DateTime<Tz>,
    end: &DateTime<Tz>,
) -> Result<Vec<EventChunk>, InvertedInterval> {
    if end < start {
        return Err(InvertedInterval {
            start: start.naive_local(),
            end: end.naive_local(),
        });
    }

    let tz = start.timezone();
    let end_date = end.date_naive();
    let mut chunks = Vec::new();
    let mut current = start.clone();

    while current.date_naive() < end_date {
        let Some(next_date) = current.date_naive().succ_opt() else {
            break;
        };
        let next_midnight = start_of_day(&tz, next_date);
        chunks.push(chunk_between(&current, &next_midnight, 24.0));
        current = next_midnight;
    }

    if current == *end && !chunks.is_empty() {
        return Ok(chunks);
    }
    chunks.push(chunk_between(&current, end, hour_of_day(end)));
    Ok(chunks)
}

/// Returns the first instant of `date` in `tz`.
///
/// An ambiguous midnight (clocks falling back onto it) resolves to the earlier
/// instant. A midnight skipped by a spring-forward gap resolves to the first
/// instant that exists on `date`.
pub fn start_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Tz> {
    let midnight = date.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&midnight) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt,
        LocalResult::None => {
            // The offset in force before the gap maps wall-clock midnight onto
            // the transition instant.
            let before = tz
                .offset_from_utc_datetime(&(midnight - Duration::days(1)))
                .fix();
            let utc = midnight - Duration::seconds(i64::from(before.local_minus_utc()));
            tz.from_utc_datetime(&utc)
        }
    }
}

/// Fractional hour-of-day of a local time, seconds included.
pub fn hour_of_day<Tz: TimeZone>(dt: &DateTime<Tz>) -> f64 {
    f64::from(dt.hour()) + f64::from(dt.minute()) / 60.0 + f64::from(dt.second()) / 3600.0
}

/// Real elapsed hours from `from` to `to`.
#[allow(clippy::cast_precision_loss)]
pub fn elapsed_hours<Tz: TimeZone>(from: &DateTime<Tz>, to: &DateTime<Tz>) -> f64 {
    let delta = to.naive_utc() - from.naive_utc();
    delta.num_milliseconds() as f64 / MS_PER_HOUR
}

fn chunk_between<Tz: TimeZone>(from: &DateTime<Tz>, to: &DateTime<Tz>, end: f64) -> EventChunk {
    let date = from.date_naive();
    EventChunk {
        year: date.year(),
        month: date.month(),
        day: date.day(),
        start: hour_of_day(from),
        end,
        hours: elapsed_hours(from, to),
    }
}
