use crate::api::logs::LogEvent;
use crate::config::Config;
use crate::window::TimeWindow;
use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};

/// Raw messages longer than this are cut when no field could be extracted
const RAW_LIMIT: usize = 120;

/// Fields holding the actual log line in structured messages, by priority
const MESSAGE_FIELDS: [&str; 3] = ["log", "message", "msg"];

const TIME_COLUMN: usize = 24;

/// Decoration applied on top of already laid out text
pub(crate) trait Palette {
    fn heading(&self, text: &str) -> String;
    fn dim(&self, text: &str) -> String;
    fn bold(&self, text: &str) -> String;
    fn warning(&self, text: &str) -> String;
}

/// No decoration at all
pub(crate) struct Plain;

impl Palette for Plain {
    fn heading(&self, text: &str) -> String {
        text.to_owned()
    }

    fn dim(&self, text: &str) -> String {
        text.to_owned()
    }

    fn bold(&self, text: &str) -> String {
        text.to_owned()
    }

    fn warning(&self, text: &str) -> String {
        text.to_owned()
    }
}

/// ANSI styles, applied regardless of terminal detection
pub(crate) struct Colored;

impl Palette for Colored {
    fn heading(&self, text: &str) -> String {
        console::style(text).cyan().force_styling(true).to_string()
    }

    fn dim(&self, text: &str) -> String {
        console::style(text).dim().force_styling(true).to_string()
    }

    fn bold(&self, text: &str) -> String {
        console::style(text).bold().force_styling(true).to_string()
    }

    fn warning(&self, text: &str) -> String {
        console::style(text).yellow().force_styling(true).to_string()
    }
}

pub(crate) fn palette(color: bool) -> Box<dyn Palette> {
    if color {
        Box::new(Colored)
    } else {
        Box::new(Plain)
    }
}

/// `2024-06-15T12:00:00.000Z`
///
/// Values chrono can't represent are printed as the raw number.
pub(crate) fn format_timestamp(timestamp_ms: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(timestamp_ms) {
        Some(datetime) => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        None => {
            log::warn!("Invalid timestamp: {timestamp_ms}");
            timestamp_ms.to_string()
        }
    }
}

/// `2024-06-15 12:00:00Z`, used for the window bounds in the summary
fn format_bound(timestamp_ms: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(timestamp_ms) {
        Some(datetime) => datetime.format("%Y-%m-%d %H:%M:%SZ").to_string(),
        None => timestamp_ms.to_string(),
    }
}

/// Best-effort human readable part of a raw log message
///
/// JSON objects are searched for a message field, anything else is shown as is.
pub(crate) fn extract_message(raw: &str) -> String {
    let trimmed = raw.trim();

    if !(trimmed.starts_with('{') && trimmed.ends_with('}')) {
        return raw.trim_end_matches(['\n', '\r']).to_owned();
    }

    serde_json::from_str::<Map<String, Value>>(trimmed)
        .inspect_err(|e| log::debug!("Message looks like JSON but is not: {e}"))
        .ok()
        .and_then(|object| {
            MESSAGE_FIELDS
                .iter()
                .find_map(|field| object.get(*field).and_then(field_text))
        })
        .unwrap_or_else(|| truncate(trimmed, RAW_LIMIT))
}

/// Text of a message field, None for values that count as absent
fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) => Some(text.trim_end().to_owned()).filter(|text| !text.is_empty()),
        other => Some(other.to_string()),
    }
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_owned();
    }

    let mut cut = text.chars().take(limit).collect::<String>();
    cut.push('…');
    cut
}

pub(crate) fn header_line(palette: &dyn Palette) -> String {
    palette.heading(&format!(
        "{:<TIME_COLUMN$} {:<TIME_COLUMN$} Message",
        "Event time", "Ingestion"
    ))
}

/// One event as `event time | ingestion time | message`
pub(crate) fn event_line(event: &LogEvent, palette: &dyn Palette) -> String {
    let ingestion = event
        .ingestion_time_ms
        .map(format_timestamp)
        .unwrap_or_default();

    // Pad before styling so escape codes don't eat into the column width
    let columns = format!(
        "{:<TIME_COLUMN$} {:<TIME_COLUMN$}",
        format_timestamp(event.timestamp_ms),
        ingestion
    );

    format!(
        "{} {}",
        palette.dim(&columns),
        palette.bold(&extract_message(&event.message))
    )
}

/// Everything printed after the fetch has finished
pub(crate) struct Report<'a> {
    pub config: &'a Config,
    pub window: &'a TimeWindow,
    pub events: &'a [LogEvent],
}

impl Report<'_> {
    pub fn text(&self, palette: &dyn Palette) -> String {
        let mut lines = vec![
            format!(
                "{} {}  ({} → {})",
                palette.bold("Window :"),
                self.window.description(),
                format_bound(self.window.start_ms()),
                format_bound(self.window.end_ms()),
            ),
            format!("{} {}", palette.bold("Group  :"), self.config.log_group),
            format!(
                "{} {}",
                palette.bold("Pattern:"),
                self.config.filter_pattern.as_deref().unwrap_or("(none)")
            ),
            String::new(),
        ];

        lines.push(format!("{} event(s) retrieved", self.events.len()));
        lines.push(String::new());
        lines.push(header_line(palette));
        lines.extend(self.events.iter().map(|event| event_line(event, palette)));

        if self.events.is_empty() {
            lines.push(palette.warning("No events found in this window."));
        }

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }

    pub fn json(&self) -> Value {
        let events = self
            .events
            .iter()
            .map(|event| {
                json!({
                    "timestamp": format_timestamp(event.timestamp_ms),
                    "ingestion_time": event.ingestion_time_ms.map(format_timestamp),
                    "message": extract_message(&event.message),
                    "raw": event.message,
                })
            })
            .collect::<Vec<Value>>();

        json!({
            "window": {
                "start": format_timestamp(self.window.start_ms()),
                "end": format_timestamp(self.window.end_ms()),
                "start_ms": self.window.start_ms(),
                "end_ms": self.window.end_ms(),
                "description": self.window.description(),
            },
            "log_group": self.config.log_group,
            "filter_pattern": self.config.filter_pattern,
            "count": events.len(),
            "events": events,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(timestamp_ms: i64, ingestion_time_ms: Option<i64>, message: &str) -> LogEvent {
        LogEvent {
            timestamp_ms,
            ingestion_time_ms,
            message: message.into(),
        }
    }

    fn config() -> Config {
        Config {
            log_group: "/aws/lambda/orders".into(),
            filter_pattern: None,
            profile: None,
            region: None,
            structured: false,
            color: false,
        }
    }

    #[test]
    fn formats_timestamps_with_millis() {
        assert_eq!(format_timestamp(1_718_452_800_123), "2024-06-15T12:00:00.123Z");
        assert_eq!(format_timestamp(0), "1970-01-01T00:00:00.000Z");
        assert_eq!(format_timestamp(i64::MAX), i64::MAX.to_string());
    }

    #[test]
    fn extracts_log_field() {
        assert_eq!(extract_message("{\"log\":\"hello world\\n\"}"), "hello world");
    }

    #[test]
    fn field_priority_is_log_message_msg() {
        let raw = r#"{"msg":"third","message":"second","log":"first"}"#;
        assert_eq!(extract_message(raw), "first");

        let raw = r#"{"msg":"third","message":"second"}"#;
        assert_eq!(extract_message(raw), "second");

        let raw = r#"  {"msg":"third","level":"info"}  "#;
        assert_eq!(extract_message(raw), "third");
    }

    #[test]
    fn empty_or_null_fields_fall_through() {
        assert_eq!(extract_message(r#"{"log":"","msg":"used"}"#), "used");
        assert_eq!(extract_message(r#"{"log":null,"message":"used"}"#), "used");
        assert_eq!(extract_message(r#"{"message":42}"#), "42");
    }

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(extract_message("plain text line"), "plain text line");
        assert_eq!(extract_message("plain text line\n"), "plain text line");
        assert_eq!(extract_message("  indented line"), "  indented line");
    }

    #[test]
    fn unrecognized_objects_are_truncated() {
        let raw = format!("{{\"other\":\"{}\"}}", "x".repeat(200));
        let extracted = extract_message(&raw);

        assert_eq!(extracted.chars().count(), RAW_LIMIT + 1);
        assert!(extracted.starts_with("{\"other\":\"xxx"));
        assert!(extracted.ends_with('…'));

        assert_eq!(extract_message(r#"{"other":"x"}"#), r#"{"other":"x"}"#);
    }

    #[test]
    fn broken_json_falls_back_to_raw_text() {
        assert_eq!(extract_message("{not json}"), "{not json}");
    }

    #[test]
    fn event_line_keeps_fixed_columns() {
        let line = event_line(
            &event(1_718_452_800_000, Some(1_718_452_801_500), "hello"),
            &Plain,
        );
        assert_eq!(
            line,
            "2024-06-15T12:00:00.000Z 2024-06-15T12:00:01.500Z hello"
        );

        let line = event_line(&event(1_718_452_800_000, None, "hello"), &Plain);
        assert_eq!(line, format!("2024-06-15T12:00:00.000Z {} hello", " ".repeat(24)));
    }

    #[test]
    fn colors_do_not_change_text() {
        let event = event(1_718_452_800_000, None, "{\"msg\":\"styled\"}");
        let colored = console::strip_ansi_codes(&event_line(&event, &Colored)).to_string();
        assert_eq!(colored, event_line(&event, &Plain));
    }

    #[test]
    fn report_lists_summary_header_and_events_in_order() {
        let config = config();
        let window = TimeWindow::new(1_718_451_000_000, 1_718_452_800_000, "last 30m".into()).unwrap();
        let events = [
            event(1_718_452_000_000, None, "second"),
            event(1_718_451_500_000, None, "first"),
        ];

        let text = Report {
            config: &config,
            window: &window,
            events: &events,
        }
        .text(&Plain);

        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(
            lines[0],
            "Window : last 30m  (2024-06-15 11:30:00Z → 2024-06-15 12:00:00Z)"
        );
        assert_eq!(lines[1], "Group  : /aws/lambda/orders");
        assert_eq!(lines[2], "Pattern: (none)");
        assert_eq!(lines[4], "2 event(s) retrieved");
        assert!(lines[6].starts_with("Event time"));
        assert!(lines[7].ends_with("second"));
        assert!(lines[8].ends_with("first"));
    }

    #[test]
    fn report_notes_empty_windows() {
        let config = Config {
            filter_pattern: Some("ERROR".into()),
            ..config()
        };
        let window = TimeWindow::new(0, 1, "last 1m".into()).unwrap();

        let text = Report {
            config: &config,
            window: &window,
            events: &[],
        }
        .text(&Plain);

        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines[2], "Pattern: ERROR");
        assert_eq!(lines[4], "0 event(s) retrieved");
        assert!(lines[6].starts_with("Event time"));
        assert!(lines[6].ends_with("Message"));
        assert_eq!(lines[7], "No events found in this window.");
        assert_eq!(lines.len(), 8);
    }

    #[test]
    fn json_report_carries_extracted_and_raw_messages() {
        let config = config();
        let window = TimeWindow::new(0, 60_000, "last 1m".into()).unwrap();
        let events = [event(1_000, Some(2_000), "{\"log\":\"hi\"}")];

        let value = Report {
            config: &config,
            window: &window,
            events: &events,
        }
        .json();

        assert_eq!(value["count"], 1);
        assert_eq!(value["filter_pattern"], Value::Null);
        assert_eq!(value["events"][0]["message"], "hi");
        assert_eq!(value["events"][0]["raw"], "{\"log\":\"hi\"}");
        assert_eq!(value["events"][0]["ingestion_time"], "1970-01-01T00:00:02.000Z");
        assert_eq!(value["window"]["end"], "1970-01-01T00:01:00.000Z");
    }
}
