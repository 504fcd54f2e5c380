//! Turn user-supplied window parameters into a concrete `[start, end)` range

pub mod calendar;
pub mod span;

use crate::error::LogsError;
use chrono::{DateTime, Datelike, NaiveDateTime, Utc};
pub use span::{Span, SpanUnit};

/// Which instant of a chosen day ends a window
#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DayAnchor {
    /// 23:59:59.999 UTC of the day
    #[default]
    EndOfDay,

    /// 00:00:00.000 UTC of the day
    Midnight,
}

/// How the window bounds are derived
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowMode {
    /// Window of the given length ending now
    Relative(Span),

    /// Window of the given length ending on a day of the current year
    ///
    /// Missing month or day fall back to the current ones.
    RelativeWithEnd {
        span: Span,
        month: Option<String>,
        day: Option<u32>,
        anchor: DayAnchor,
    },

    /// Explicit ISO-8601 bounds, the end defaults to now
    Absolute {
        start: Option<String>,
        end: Option<String>,
    },
}

/// Resolved query range in milliseconds since the epoch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeWindow {
    start_ms: i64,
    end_ms: i64,
    description: String,
}

impl TimeWindow {
    pub fn new(start_ms: i64, end_ms: i64, description: String) -> Result<Self, LogsError> {
        if start_ms >= end_ms {
            return Err(LogsError::invalid_window(
                "Start time must be earlier than end time",
            ));
        }

        Ok(TimeWindow {
            start_ms,
            end_ms,
            description,
        })
    }

    pub fn start_ms(&self) -> i64 {
        self.start_ms
    }

    pub fn end_ms(&self) -> i64 {
        self.end_ms
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl WindowMode {
    /// Resolve the window against the current time
    pub fn resolve(&self) -> Result<TimeWindow, LogsError> {
        self.resolve_at(Utc::now())
    }

    /// Resolve the window as if the current time was `now`
    pub fn resolve_at(&self, now: DateTime<Utc>) -> Result<TimeWindow, LogsError> {
        let now_ms = now.timestamp_millis();

        match self {
            WindowMode::Relative(span) => {
                TimeWindow::new(now_ms - span.millis()?, now_ms, format!("last {span}"))
            }

            WindowMode::RelativeWithEnd {
                span,
                month,
                day,
                anchor,
            } => {
                let month = match month {
                    Some(name) => calendar::month_number(name)?,
                    None => now.month(),
                };

                let date = calendar::date(now.year(), month, day.unwrap_or(now.day()))?;

                let (end, description) = match anchor {
                    DayAnchor::EndOfDay => (
                        calendar::end_of_day(date),
                        format!("{span} window on {date}"),
                    ),
                    DayAnchor::Midnight => (
                        calendar::midnight(date),
                        format!("{span} window ending {date} 00:00Z"),
                    ),
                };

                // Never query into the future
                let end_ms = end.timestamp_millis().min(now_ms);
                TimeWindow::new(end_ms - span.millis()?, end_ms, description)
            }

            WindowMode::Absolute { start, end } => {
                let start = start
                    .as_deref()
                    .filter(|s| !s.trim().is_empty())
                    .ok_or_else(|| {
                        LogsError::invalid_window("Start time is required for absolute mode")
                    })?;

                let start_ms = parse_instant(start)?;

                let end_ms = match end.as_deref().filter(|s| !s.trim().is_empty()) {
                    Some(end) => parse_instant(end)?,
                    None => now_ms,
                };

                TimeWindow::new(start_ms, end_ms, "absolute range".into())
            }
        }
    }
}

/// Epoch milliseconds of an ISO-8601 timestamp
///
/// RFC 3339 values carry their own offset, bare `YYYY-MM-DDTHH:MM:SS` is taken as UTC.
pub fn parse_instant(value: &str) -> Result<i64, LogsError> {
    let value = value.trim();

    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Ok(datetime.timestamp_millis());
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .map(|naive| naive.and_utc().timestamp_millis())
        .map_err(|e| LogsError::invalid_window(format!("Invalid ISO-8601 timestamp {value:?}: {e}")))
}
