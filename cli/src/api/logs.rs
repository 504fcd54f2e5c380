/// One FilterLogEvents request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pub log_group_name: String,
    pub start_ms: i64,
    pub end_ms: i64,
    pub filter_pattern: Option<String>,

    /// Replaced on each page turn
    pub continuation_token: Option<String>,
}

/// One page of results
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub events: Vec<LogEvent>,
    pub continuation_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    pub timestamp_ms: i64,
    pub ingestion_time_ms: Option<i64>,
    pub message: String,
}
