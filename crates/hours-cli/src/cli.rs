//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use hours_core::Month;

/// Calendar hours aggregator.
///
/// Totals the hours of calendar events whose title matches a filter over one
/// month, split into per-day chunks.
#[derive(Debug, Parser)]
#[command(name = "gcal-hours", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Report per-day hours for matching events in a month.
    Report(ReportArgs),

    /// Split a single time range into per-day chunks.
    Split {
        /// Range start (RFC 3339, or local `YYYY-MM-DDTHH:MM[:SS]`).
        #[arg(long)]
        start: String,

        /// Range end (RFC 3339, or local `YYYY-MM-DDTHH:MM[:SS]`).
        #[arg(long)]
        end: String,

        /// IANA time zone whose midnights cut the range.
        #[arg(long = "tz")]
        timezone: Option<String>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Options for `gcal-hours report`.
#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Events file: a Google Calendar `events.list` response or a JSON array
    /// of events. Use `-` for stdin.
    #[arg(short, long)]
    pub events: Option<PathBuf>,

    /// Month to report on (e.g., 2025-05). Defaults to the current month.
    #[arg(short, long)]
    pub month: Option<Month>,

    /// Only count events whose title contains this text (case-sensitive).
    #[arg(short, long)]
    pub title: Option<String>,

    /// Hourly rate used to compute the billing amount.
    #[arg(long)]
    pub rate: Option<f64>,

    /// IANA time zone for day boundaries. Defaults to the system zone.
    #[arg(long = "tz")]
    pub timezone: Option<String>,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,

    /// Sort chunks by date instead of keeping event order.
    #[arg(long)]
    pub sort: bool,

    /// Skip malformed events with a warning instead of failing.
    #[arg(long)]
    pub skip_invalid: bool,
}
