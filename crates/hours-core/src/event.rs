//! Raw calendar events as delivered by the calendar provider.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chunk::{InvertedInterval, start_of_day};

/// Which side of an event a boundary sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Boundary {
    Start,
    End,
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Start => "start",
            Self::End => "end",
        };
        write!(f, "{s}")
    }
}

/// Errors raised while turning raw events into chunks.
///
/// Each variant carries the event title and the raw boundary text so callers
/// can report the offending record.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AggregateError {
    /// A boundary could not be parsed into an instant or a date.
    #[error("event {title:?}: malformed {boundary} {raw:?}: {reason}")]
    MalformedEvent {
        title: String,
        boundary: Boundary,
        raw: String,
        reason: String,
    },

    /// The resolved end precedes the resolved start.
    #[error("event {title:?}: end {end:?} precedes start {start:?}")]
    InvertedInterval {
        title: String,
        start: String,
        end: String,
        #[source]
        source: InvertedInterval,
    },
}

/// One side of an event: a timestamp, or a date for all-day events.
///
/// Mirrors the Google Calendar `EventDateTime` resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTime {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// IANA zone used to interpret a `date_time` that has no offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl EventTime {
    /// A timestamp boundary.
    pub fn at(date_time: impl Into<String>) -> Self {
        Self {
            date_time: Some(date_time.into()),
            ..Self::default()
        }
    }

    /// An all-day boundary.
    pub fn on(date: impl Into<String>) -> Self {
        Self {
            date: Some(date.into()),
            ..Self::default()
        }
    }

    /// The raw text this boundary was built from.
    pub fn raw(&self) -> &str {
        self.date_time
            .as_deref()
            .or(self.date.as_deref())
            .unwrap_or_default()
    }

    /// Resolves the boundary to an instant in `tz`.
    ///
    /// Timestamps keep their instant and are only re-expressed in `tz`; dates
    /// resolve to the start of that day in `tz`.
    fn resolve<Tz: TimeZone>(&self, tz: &Tz) -> Result<DateTime<Tz>, String> {
        if let Some(raw) = &self.date_time {
            if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
                return Ok(dt.with_timezone(tz));
            }
            let Some(zone) = &self.time_zone else {
                return Err("expected an RFC 3339 timestamp".to_string());
            };
            let zone = zone
                .parse::<chrono_tz::Tz>()
                .map_err(|err| err.to_string())?;
            let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
                .map_err(|err| err.to_string())?;
            let local = zone
                .from_local_datetime(&naive)
                .earliest()
                .ok_or_else(|| format!("{naive} does not exist in {zone}"))?;
            return Ok(local.with_timezone(tz));
        }

        if let Some(raw) = &self.date {
            let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|err| err.to_string())?;
            return Ok(start_of_day(tz, date));
        }

        Err("missing both dateTime and date".to_string())
    }
}

/// A calendar event as fetched from the provider.
///
/// Only the fields needed for aggregation are modelled; anything else in the
/// provider's payload is ignored on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub start: EventTime,
    #[serde(default)]
    pub end: EventTime,
}

impl RawEvent {
    pub fn new(summary: impl Into<String>, start: EventTime, end: EventTime) -> Self {
        Self {
            id: None,
            summary: Some(summary.into()),
            start,
            end,
        }
    }

    /// The event title; a missing summary reads as empty.
    pub fn title(&self) -> &str {
        self.summary.as_deref().unwrap_or_default()
    }

    /// Case-sensitive substring match against the title.
    pub fn matches(&self, title_filter: &str) -> bool {
        self.title().contains(title_filter)
    }

    /// Resolves both boundaries into instants in `tz`.
    pub fn resolve<Tz: TimeZone>(
        &self,
        tz: &Tz,
    ) -> Result<(DateTime<Tz>, DateTime<Tz>), AggregateError> {
        let start = self.resolve_boundary(Boundary::Start, tz)?;
        let end = self.resolve_boundary(Boundary::End, tz)?;
        Ok((start, end))
    }

    fn resolve_boundary<Tz: TimeZone>(
        &self,
        boundary: Boundary,
        tz: &Tz,
    ) -> Result<DateTime<Tz>, AggregateError> {
        let time = match boundary {
            Boundary::Start => &self.start,
            Boundary::End => &self.end,
        };
        time.resolve(tz)
            .map_err(|reason| AggregateError::MalformedEvent {
                title: self.title().to_string(),
                boundary,
                raw: time.raw().to_string(),
                reason,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Timelike, Utc};

    #[test]
    fn deserializes_google_event_resource() {
        let json = r#"{
            "kind": "calendar#event",
            "id": "abc123",
            "status": "confirmed",
            "summary": "Work: client A",
            "start": {"dateTime": "2025-05-01T18:00:00+09:00", "timeZone": "Asia/Tokyo"},
            "end": {"dateTime": "2025-05-01T19:30:00+09:00", "timeZone": "Asia/Tokyo"}
        }"#;
        let event: RawEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.id.as_deref(), Some("abc123"));
        assert_eq!(event.title(), "Work: client A");
        assert_eq!(event.start.raw(), "2025-05-01T18:00:00+09:00");
        assert_eq!(event.end.time_zone.as_deref(), Some("Asia/Tokyo"));
    }

    #[test]
    fn missing_summary_reads_as_empty_title() {
        let event: RawEvent = serde_json::from_str(
            r#"{"start": {"date": "2025-05-01"}, "end": {"date": "2025-05-02"}}"#,
        )
        .unwrap();
        assert_eq!(event.title(), "");
        assert!(event.matches(""));
        assert!(!event.matches("Work"));
    }

    #[test]
    fn title_match_is_case_sensitive_substring() {
        let event = RawEvent::new("Weekly Work sync", EventTime::default(), EventTime::default());
        assert!(event.matches("Work"));
        assert!(event.matches("ly Wo"));
        assert!(!event.matches("work"));
        assert!(!event.matches("Work "));
        assert!(!event.matches(" Weekly"));
    }

    #[test]
    fn timestamps_are_reexpressed_in_target_zone() {
        let event = RawEvent::new(
            "Work",
            EventTime::at("2025-05-01T23:30:00Z"),
            EventTime::at("2025-05-02T01:00:00Z"),
        );
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let (start, end) = event.resolve(&tokyo).unwrap();
        assert_eq!(start.naive_local().to_string(), "2025-05-02 08:30:00");
        assert_eq!(end.naive_local().to_string(), "2025-05-02 10:00:00");
    }

    #[test]
    fn dates_resolve_to_local_midnight() {
        let event = RawEvent::new(
            "Holiday",
            EventTime::on("2025-05-01"),
            EventTime::on("2025-05-02"),
        );
        let berlin = chrono_tz::Europe::Berlin;
        let (start, end) = event.resolve(&berlin).unwrap();
        assert_eq!(start.naive_local().to_string(), "2025-05-01 00:00:00");
        assert_eq!(end.naive_local().to_string(), "2025-05-02 00:00:00");
        assert_eq!(start.with_timezone(&Utc).hour(), 22);
    }

    #[test]
    fn offsetless_timestamp_uses_boundary_zone() {
        let start = EventTime {
            date_time: Some("2025-05-01T09:00:00".to_string()),
            time_zone: Some("America/New_York".to_string()),
            ..EventTime::default()
        };
        let event = RawEvent::new("Work", start, EventTime::at("2025-05-01T15:00:00Z"));
        let (start, _) = event.resolve(&Utc).unwrap();
        assert_eq!(start.hour(), 13);
    }

    #[test]
    fn malformed_boundary_names_event_and_side() {
        let event = RawEvent::new(
            "Work",
            EventTime::at("2025-05-01T18:00:00Z"),
            EventTime::at("tomorrow-ish"),
        );
        let err = event.resolve(&Utc).unwrap_err();
        match err {
            AggregateError::MalformedEvent {
                title,
                boundary,
                raw,
                ..
            } => {
                assert_eq!(title, "Work");
                assert_eq!(boundary, Boundary::End);
                assert_eq!(raw, "tomorrow-ish");
            }
            other @ AggregateError::InvertedInterval { .. } => {
                panic!("unexpected error: {other}")
            }
        }
    }

    #[test]
    fn empty_boundary_is_malformed() {
        let event = RawEvent::new("Work", EventTime::default(), EventTime::on("2025-05-01"));
        let err = event.resolve(&Utc).unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"event "Work": malformed start "": missing both dateTime and date"#
        );
    }

    #[test]
    fn unknown_boundary_zone_is_malformed() {
        let start = EventTime {
            date_time: Some("2025-05-01T09:00:00".to_string()),
            time_zone: Some("Mars/Olympus_Mons".to_string()),
            ..EventTime::default()
        };
        let event = RawEvent::new("Work", start, EventTime::at("2025-05-01T15:00:00Z"));
        assert!(matches!(
            event.resolve(&Utc),
            Err(AggregateError::MalformedEvent {
                boundary: Boundary::Start,
                ..
            })
        ));
    }
}
