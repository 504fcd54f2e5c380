/// Display global error message in unified format
#[derive(Debug)]
pub struct Error(String, Option<String>);

impl Error {
    pub fn new(message: &str, details: Option<&str>) -> Self {
        Error(message.to_string(), details.map(|d| d.to_string()))
    }
}

/// Display the message and details, as sort of a hint
impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match &self.1 {
            Some(details) => write!(f, "{}\n\n{}", self.0, console::style(details).dim()),
            None => write!(f, "{}", self.0),
        }
    }
}

/// Implement std::error::Error trait for Error
impl std::error::Error for Error {}

/// Convert eyre reports, keeping the original message if the report wraps an Error
impl From<eyre::ErrReport> for Error {
    fn from(error: eyre::ErrReport) -> Self {
        error
            .downcast::<Error>()
            .unwrap_or_else(|err| Error::new(&err.to_string(), None))
    }
}

/// Failures of the window resolution and fetch pipeline
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LogsError {
    /// Malformed duration, timestamp or calendar date, or an empty range
    #[error("Invalid time window: {0}")]
    InvalidWindow(String),

    /// The FilterLogEvents call itself failed (auth, network, throttling, missing group)
    #[error("Failed to query log events: {0}")]
    Transport(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl LogsError {
    pub fn invalid_window(message: impl Into<String>) -> Self {
        LogsError::InvalidWindow(message.into())
    }

    /// Title and hint shown to the user
    pub fn describe(&self) -> (&'static str, String) {
        match self {
            LogsError::InvalidWindow(message) => ("Invalid time window", message.clone()),
            LogsError::Transport(message) => (
                "Failed to fetch log events",
                format!("{message}\nCheck your AWS credentials, region and log group name."),
            ),
            LogsError::Config(message) => ("Invalid configuration", message.clone()),
        }
    }
}

impl From<LogsError> for Error {
    fn from(error: LogsError) -> Self {
        let (title, details) = error.describe();
        Error::new(title, Some(&details))
    }
}
