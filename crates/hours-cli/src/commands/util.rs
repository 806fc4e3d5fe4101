//! Shared utilities for CLI commands.

use anyhow::Context;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use hours_core::Month;

/// Wall-clock formats accepted when a datetime carries no offset.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Resolves the time zone used for day boundaries.
///
/// An explicit name wins; otherwise the system zone is used, falling back to
/// UTC when it cannot be detected or is not a known IANA name.
pub fn resolve_timezone(explicit: Option<&str>) -> anyhow::Result<Tz> {
    if let Some(name) = explicit {
        return name
            .parse::<Tz>()
            .map_err(|err| anyhow::anyhow!("unknown time zone {name:?}: {err}"));
    }

    match iana_time_zone::get_timezone() {
        Ok(name) => {
            if let Ok(tz) = name.parse::<Tz>() {
                return Ok(tz);
            }
            tracing::warn!(timezone = %name, "unrecognized system time zone, using UTC");
        }
        Err(err) => tracing::warn!(%err, "could not detect system time zone, using UTC"),
    }
    Ok(Tz::UTC)
}

/// The month containing the current instant in `tz`.
pub fn current_month(tz: &Tz) -> Month {
    Month::containing(Utc::now().with_timezone(tz).date_naive())
}

/// Parse a datetime string as either RFC 3339 or wall-clock time in `tz`.
///
/// Supports:
/// - RFC 3339: "2025-05-01T18:00:00Z", "2025-05-01T18:00:00+09:00"
/// - Wall clock: "2025-05-01T18:00", "2025-05-01 18:00:30"
pub fn parse_datetime(s: &str, tz: &Tz) -> anyhow::Result<DateTime<Tz>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(tz));
    }

    let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
    else {
        anyhow::bail!(
            "Invalid datetime: {s}. Use RFC 3339 (e.g., 2025-05-01T18:00:00Z) or local time (e.g., 2025-05-01T18:00)"
        );
    };

    tz.from_local_datetime(&naive)
        .earliest()
        .with_context(|| format!("{naive} does not exist in {tz}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Timelike;

    #[test]
    fn test_resolve_explicit_timezone() {
        let tz = resolve_timezone(Some("Asia/Tokyo")).unwrap();
        assert_eq!(tz, chrono_tz::Asia::Tokyo);
    }

    #[test]
    fn test_resolve_unknown_timezone_fails() {
        let err = resolve_timezone(Some("Nowhere/Special")).unwrap_err();
        assert!(err.to_string().contains("Nowhere/Special"));
    }

    #[test]
    fn test_resolve_system_timezone_never_fails() {
        assert!(resolve_timezone(None).is_ok());
    }

    #[test]
    fn test_parse_rfc3339_converts_zone() {
        let dt = parse_datetime("2025-05-01T18:00:00Z", &chrono_tz::Asia::Tokyo).unwrap();
        assert_eq!(dt.naive_local().to_string(), "2025-05-02 03:00:00");
    }

    #[test]
    fn test_parse_wall_clock_formats() {
        let tz = chrono_tz::Europe::Berlin;
        for input in ["2025-05-01T18:30", "2025-05-01T18:30:00", "2025-05-01 18:30"] {
            let dt = parse_datetime(input, &tz).unwrap();
            assert_eq!((dt.hour(), dt.minute()), (18, 30), "input {input}");
        }
    }

    #[test]
    fn test_parse_nonexistent_wall_clock_fails() {
        // 02:30 is skipped on 2025-03-30 in Berlin.
        let result = parse_datetime("2025-03-30T02:30", &chrono_tz::Europe::Berlin);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_invalid() {
        let result = parse_datetime("yesterday", &Tz::UTC);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid datetime"));
    }

    #[test]
    fn test_current_month_is_valid() {
        let month = current_month(&Tz::UTC);
        assert!((1..=12).contains(&month.month()));
    }
}
