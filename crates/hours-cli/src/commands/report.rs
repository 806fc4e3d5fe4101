//! Report command for monthly hour totals.
//!
//! This module implements `gcal-hours report`: it keeps the events whose title
//! matches the filter and whose span touches the month, splits them into
//! per-day chunks, and renders the chunks with their total (and billing
//! amount when a rate is set) as CSV-style text or JSON.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::{Context, Result};
use chrono_tz::Tz;
use hours_core::{EventChunk, HourlyRate, Month, RawEvent, aggregate_hours, event_chunks, total_hours};
use serde::Serialize;

use crate::commands::util;
use crate::{Config, ReportArgs, source};

/// Header line of the text report.
pub const CSV_HEADER: &str = "year,month,day,start,end,hours";

/// Fully resolved report settings.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub month: Month,
    pub title_filter: String,
    pub hourly_rate: Option<HourlyRate>,
    pub sort: bool,
    pub skip_invalid: bool,
}

/// Computed report data.
#[derive(Debug, Serialize)]
pub struct ReportData {
    pub month: Month,
    pub timezone: String,
    pub title_filter: String,
    pub chunks: Vec<EventChunk>,
    pub total_hours: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<HourlyRate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    pub skipped_events: usize,
}

// ========== Report Generation ==========

/// Builds the report for `events` in `tz`.
pub fn generate_report_data(
    events: &[RawEvent],
    options: &ReportOptions,
    tz: &Tz,
) -> Result<ReportData> {
    let mut selected = Vec::new();
    let mut skipped_events = 0;

    for event in events.iter().filter(|e| e.matches(&options.title_filter)) {
        match event.resolve(tz) {
            Ok((start, end)) => {
                if options.month.overlaps(&start, &end, tz) {
                    selected.push(event.clone());
                } else {
                    tracing::debug!(
                        id = event.id.as_deref(),
                        title = event.title(),
                        "event outside month"
                    );
                }
            }
            Err(err) if options.skip_invalid => {
                tracing::warn!(%err, id = event.id.as_deref(), "skipping event");
                skipped_events += 1;
            }
            Err(err) => return Err(err.into()),
        }
    }

    let mut chunks = if options.skip_invalid {
        let mut chunks = Vec::new();
        for event in &selected {
            match event_chunks(event, tz) {
                Ok(new_chunks) => chunks.extend(new_chunks),
                Err(err) => {
                    tracing::warn!(%err, id = event.id.as_deref(), "skipping event");
                    skipped_events += 1;
                }
            }
        }
        chunks
    } else {
        aggregate_hours(&selected, &options.title_filter, tz)?
    };

    if options.sort {
        sort_chunks(&mut chunks);
    }

    let total_hours = total_hours(&chunks);
    tracing::info!(
        month = %options.month,
        events = selected.len(),
        chunks = chunks.len(),
        total_hours,
        "computed report"
    );

    Ok(ReportData {
        month: options.month,
        timezone: tz.name().to_string(),
        title_filter: options.title_filter.clone(),
        chunks,
        total_hours,
        hourly_rate: options.hourly_rate,
        amount: options.hourly_rate.map(|rate| rate.amount(total_hours)),
        skipped_events,
    })
}

/// Stable sort by calendar date, then start hour.
pub fn sort_chunks(chunks: &mut [EventChunk]) {
    chunks.sort_by(|a, b| {
        (a.year, a.month, a.day)
            .cmp(&(b.year, b.month, b.day))
            .then(a.start.total_cmp(&b.start))
    });
}

// ========== Text Output ==========

/// Formats an hour value with up to four decimals, trailing zeros dropped.
pub fn format_hours(value: f64) -> String {
    let text = format!("{value:.4}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

/// Formats one chunk as a CSV line.
pub fn format_chunk(chunk: &EventChunk) -> String {
    format!(
        "{},{:02},{:02},{},{},{}",
        chunk.year,
        chunk.month,
        chunk.day,
        format_hours(chunk.start),
        format_hours(chunk.end),
        format_hours(chunk.hours)
    )
}

/// Formats the header and one line per chunk.
pub fn format_chunks(chunks: &[EventChunk]) -> String {
    let mut output = String::new();
    writeln!(output, "{CSV_HEADER}").unwrap();
    for chunk in chunks {
        writeln!(output, "{}", format_chunk(chunk)).unwrap();
    }
    output
}

/// Formats the human-readable report output.
pub fn format_report(data: &ReportData) -> String {
    let mut output = format_chunks(&data.chunks);

    writeln!(output, "----").unwrap();
    writeln!(output, "Total Hours: {:.2} hours", data.total_hours).unwrap();

    if let (Some(rate), Some(amount)) = (data.hourly_rate, data.amount) {
        writeln!(output, "Hourly Rate: {rate}").unwrap();
        writeln!(output, "Amount: {amount:.2}").unwrap();
    }

    if data.skipped_events > 0 {
        writeln!(output, "Skipped Events: {}", data.skipped_events).unwrap();
    }

    output
}

// ========== JSON Output ==========

/// Formats report data as JSON.
pub fn format_report_json(data: &ReportData) -> Result<String> {
    Ok(serde_json::to_string_pretty(data)?)
}

// ========== Public Interface ==========

/// Resolves flags against the config into report settings.
pub fn resolve_options(args: &ReportArgs, config: &Config, tz: &Tz) -> Result<ReportOptions> {
    let hourly_rate = args
        .rate
        .map(HourlyRate::new)
        .transpose()
        .context("invalid --rate")?
        .or(config.hourly_rate);

    Ok(ReportOptions {
        month: args
            .month
            .or(config.month)
            .unwrap_or_else(|| util::current_month(tz)),
        title_filter: args
            .title
            .clone()
            .unwrap_or_else(|| config.title_filter.clone()),
        hourly_rate,
        sort: args.sort,
        skip_invalid: args.skip_invalid,
    })
}

/// Runs the report command.
pub fn run<W: Write>(writer: &mut W, args: &ReportArgs, config: &Config) -> Result<()> {
    let tz = util::resolve_timezone(args.timezone.as_deref().or(config.timezone.as_deref()))?;
    let options = resolve_options(args, config, &tz)?;

    let events_path = args
        .events
        .as_deref()
        .or(config.events_path.as_deref())
        .context("no events file: pass --events or set events_path in the config")?;
    let events = source::load_events(events_path)?;

    let data = generate_report_data(&events, &options, &tz)?;

    if args.json {
        writeln!(writer, "{}", format_report_json(&data)?)?;
    } else {
        write!(writer, "{}", format_report(&data))?;
    }

    Ok(())
}
