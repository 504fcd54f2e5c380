use crate::error::LogsError;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Month number (1-12) of a full English month name, in any case
pub fn month_number(name: &str) -> Result<u32, LogsError> {
    let lowered = name.trim().to_lowercase();

    MONTHS
        .iter()
        .position(|month| *month == lowered)
        .map(|index| index as u32 + 1)
        .ok_or_else(|| LogsError::invalid_window(format!("Unknown month: {name:?}")))
}

/// Calendar date in the given year, rejecting days the month does not have
pub fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate, LogsError> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        LogsError::invalid_window(format!("No such date: {year:04}-{month:02}-{day:02}"))
    })
}

/// 23:59:59.999 UTC on the date
pub fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    midnight(date) + Duration::days(1) - Duration::milliseconds(1)
}

/// 00:00:00.000 UTC on the date
pub fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}
