//! Turning a list of raw events into daily chunks and totals.

use chrono::TimeZone;

use crate::chunk::{EventChunk, split_into_days};
use crate::event::{AggregateError, RawEvent};

/// Resolves and splits every event whose title contains `title_filter`.
///
/// Chunks keep the input event order, and chronological order within each
/// event; the result is not re-sorted. The first malformed or inverted event
/// aborts the whole aggregation.
pub fn aggregate_hours<Tz: TimeZone>(
    events: &[RawEvent],
    title_filter: &str,
    tz: &Tz,
) -> Result<Vec<EventChunk>, AggregateError> {
    let mut chunks = Vec::new();
    for event in events.iter().filter(|event| event.matches(title_filter)) {
        chunks.extend(event_chunks(event, tz)?);
    }
    Ok(chunks)
}

/// Resolves and splits a single event, ignoring its title.
pub fn event_chunks<Tz: TimeZone>(
    event: &RawEvent,
    tz: &Tz,
) -> Result<Vec<EventChunk>, AggregateError> {
    let (start, end) = event.resolve(tz)?;
    let chunks =
        split_into_days(&start, &end).map_err(|source| AggregateError::InvertedInterval {
            title: event.title().to_string(),
            start: event.start.raw().to_string(),
            end: event.end.raw().to_string(),
            source,
        })?;
    tracing::debug!(
        id = event.id.as_deref(),
        title = event.title(),
        chunks = chunks.len(),
        "split event"
    );
    Ok(chunks)
}

/// Sum of every chunk's hours, unrounded.
pub fn total_hours(chunks: &[EventChunk]) -> f64 {
    chunks.iter().map(|chunk| chunk.hours).sum()
}
