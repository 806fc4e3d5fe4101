//! Loading calendar events exported from the provider.
//!
//! Accepts either a full `events.list` response (`{"items": [...]}`, other
//! keys ignored) or a bare JSON array of event resources.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use hours_core::RawEvent;
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum EventsPayload {
    Bare(Vec<RawEvent>),
    List {
        #[serde(default)]
        items: Vec<RawEvent>,
    },
}

/// Reads events from `path`, or from stdin when `path` is `-`.
pub fn load_events(path: &Path) -> Result<Vec<RawEvent>> {
    let text = if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read events from stdin")?;
        text
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };

    let events = parse_events(&text)
        .with_context(|| format!("failed to parse events from {}", path.display()))?;
    tracing::debug!(count = events.len(), path = %path.display(), "loaded events");
    Ok(events)
}

/// Parses an events payload.
pub fn parse_events(text: &str) -> Result<Vec<RawEvent>> {
    let payload: EventsPayload =
        serde_json::from_str(text).context("expected an events list or an array of events")?;
    Ok(match payload {
        EventsPayload::Bare(events) | EventsPayload::List { items: events } => events,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use tempfile::NamedTempFile;

    const LIST_RESPONSE: &str = r#"{
        "kind": "calendar#events",
        "summary": "Work calendar",
        "timeZone": "Asia/Tokyo",
        "items": [
            {
                "id": "a",
                "summary": "Work",
                "start": {"dateTime": "2025-05-01T18:00:00+09:00"},
                "end": {"dateTime": "2025-05-01T19:30:00+09:00"}
            },
            {
                "id": "b",
                "summary": "Holiday",
                "start": {"date": "2025-05-03"},
                "end": {"date": "2025-05-04"}
            }
        ]
    }"#;

    #[test]
    fn test_parse_list_response() {
        let events = parse_events(LIST_RESPONSE).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].title(), "Work");
        assert_eq!(events[1].start.date.as_deref(), Some("2025-05-03"));
    }

    #[test]
    fn test_parse_bare_array() {
        let events = parse_events(
            r#"[{"summary": "Work", "start": {"date": "2025-05-01"}, "end": {"date": "2025-05-02"}}]"#,
        )
        .unwrap();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_parse_list_without_items_is_empty() {
        let events = parse_events(r#"{"kind": "calendar#events"}"#).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_parse_rejects_non_json() {
        assert!(parse_events("not json").is_err());
        assert!(parse_events("42").is_err());
    }

    #[test]
    fn test_load_events_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(LIST_RESPONSE.as_bytes()).unwrap();
        file.flush().unwrap();

        let events = load_events(file.path()).unwrap();
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_load_events_missing_file() {
        let err = load_events(Path::new("/nonexistent/events.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/events.json"));
    }
}
