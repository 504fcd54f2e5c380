use crate::error::LogsError;
use once_cell::sync::Lazy;
use std::fmt;

/// `<integer><unit letter>`, e.g. `30m` or `2w`
static TOKEN: Lazy<regex::Regex> =
    Lazy::new(|| regex::Regex::new(r"^(\d+)([mhdw])$").expect("Duration token regex is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Minute,
    Hour,
    Day,
    Week,
}

impl Unit {
    pub fn seconds(&self) -> i64 {
        match self {
            Unit::Minute => 60,
            Unit::Hour => 3_600,
            Unit::Day => 86_400,
            Unit::Week => 604_800,
        }
    }

    fn letter(&self) -> char {
        match self {
            Unit::Minute => 'm',
            Unit::Hour => 'h',
            Unit::Day => 'd',
            Unit::Week => 'w',
        }
    }

    fn from_letter(letter: &str) -> Option<Self> {
        match letter {
            "m" => Some(Unit::Minute),
            "h" => Some(Unit::Hour),
            "d" => Some(Unit::Day),
            "w" => Some(Unit::Week),
            _ => None,
        }
    }
}

/// Units offered when the amount is given as a separate integer
///
/// There is intentionally no week option in this form.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanUnit {
    Minutes,
    Hours,
    Days,
}

impl From<SpanUnit> for Unit {
    fn from(unit: SpanUnit) -> Self {
        match unit {
            SpanUnit::Minutes => Unit::Minute,
            SpanUnit::Hours => Unit::Hour,
            SpanUnit::Days => Unit::Day,
        }
    }
}

/// Length of a relative window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    amount: u64,
    unit: Unit,
}

impl Span {
    pub fn new(amount: u64, unit: impl Into<Unit>) -> Self {
        Span {
            amount,
            unit: unit.into(),
        }
    }

    /// Parse a token like `5m`, `3h`, `2d` or `4w`
    pub fn parse(token: &str) -> Result<Self, LogsError> {
        let token = token.trim();

        let captures = TOKEN
            .captures(token)
            .ok_or_else(|| LogsError::invalid_window(format!("Unsupported window: {token:?}")))?;

        let amount = captures[1]
            .parse::<u64>()
            .map_err(|e| LogsError::invalid_window(format!("Window is too large: {token:?} ({e})")))?;

        // The regex only lets the four known letters through
        let unit = Unit::from_letter(&captures[2])
            .ok_or_else(|| LogsError::invalid_window(format!("Unsupported window: {token:?}")))?;

        Ok(Span { amount, unit })
    }

    pub fn seconds(&self) -> Result<i64, LogsError> {
        i64::try_from(self.amount)
            .ok()
            .and_then(|amount| amount.checked_mul(self.unit.seconds()))
            .ok_or_else(|| LogsError::invalid_window(format!("Window is too large: {self}")))
    }

    pub fn millis(&self) -> Result<i64, LogsError> {
        duration_to_seconds(&self.to_string())?
            .checked_mul(1000)
            .ok_or_else(|| LogsError::invalid_window(format!("Window is too large: {self}")))
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.unit.letter())
    }
}

/// Number of seconds in a window token such as `30m`
pub fn duration_to_seconds(token: &str) -> Result<i64, LogsError> {
    Span::parse(token)?.seconds()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_tokens_to_seconds() {
        assert_eq!(duration_to_seconds("5m"), Ok(300));
        assert_eq!(duration_to_seconds("3h"), Ok(10_800));
        assert_eq!(duration_to_seconds("2d"), Ok(172_800));
        assert_eq!(duration_to_seconds("4w"), Ok(2_419_200));
        assert_eq!(duration_to_seconds(" 45m "), Ok(2_700));
    }

    #[test]
    fn rejects_unknown_or_malformed_tokens() {
        for token in ["5x", "", "m", "5", "5M", "-5m", "5 m", "1.5h", "5mm"] {
            assert!(
                matches!(duration_to_seconds(token), Err(LogsError::InvalidWindow(_))),
                "{token:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_overflowing_amounts() {
        assert!(matches!(
            duration_to_seconds("99999999999999999999w"),
            Err(LogsError::InvalidWindow(_))
        ));

        assert!(matches!(
            Span::new(u64::MAX / 2, Unit::Week).millis(),
            Err(LogsError::InvalidWindow(_))
        ));
    }

    #[test]
    fn enumerated_units_match_letters() {
        assert_eq!(Span::new(5, SpanUnit::Hours), Span::parse("5h").unwrap());
        assert_eq!(Span::new(5, SpanUnit::Minutes).seconds(), Ok(300));
        assert_eq!(Span::new(2, SpanUnit::Days).to_string(), "2d");
    }

    #[test]
    fn millis_follow_token_seconds() {
        assert_eq!(Span::new(5, SpanUnit::Minutes).millis(), Ok(300_000));
        assert_eq!(Span::parse("4w").unwrap().millis(), Ok(2_419_200_000));
    }
}
