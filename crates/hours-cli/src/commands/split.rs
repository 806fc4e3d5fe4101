//! Split command for inspecting how one time range is cut into days.

use std::io::Write;

use anyhow::Result;
use chrono_tz::Tz;
use hours_core::{EventChunk, split_into_days, total_hours};

use crate::commands::report::{format_chunks, format_hours};
use crate::commands::util;

/// Splits `[start, end)` in `tz`.
pub fn split_range(start: &str, end: &str, tz: &Tz) -> Result<Vec<EventChunk>> {
    let start = util::parse_datetime(start, tz)?;
    let end = util::parse_datetime(end, tz)?;
    Ok(split_into_days(&start, &end)?)
}

/// Runs the split command.
pub fn run<W: Write>(
    writer: &mut W,
    start: &str,
    end: &str,
    timezone: Option<&str>,
    json: bool,
) -> Result<()> {
    let tz = util::resolve_timezone(timezone)?;
    let chunks = split_range(start, end, &tz)?;

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&chunks)?)?;
    } else {
        write!(writer, "{}", format_chunks(&chunks))?;
        writeln!(writer, "----")?;
        writeln!(writer, "Total Hours: {} hours", format_hours(total_hours(&chunks)))?;
    }
    Ok(())
}
