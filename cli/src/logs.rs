use crate::api::logs::{LogEvent, QueryParams};
use crate::client::EventSource;
use crate::config::Config;
use crate::error::{Error, LogsError};
use crate::render::{Palette, Report};
use crate::window::TimeWindow;
use crate::writer::Writer;
use indicatif::ProgressBar;

/// Pages through FilterLogEvents until the service stops returning a continuation token
///
/// All events are kept in memory, there is no cap on pages or events.
pub(crate) struct Fetcher<'a, S: EventSource> {
    source: &'a S,
    progress: ProgressBar,
}

impl<'a, S: EventSource> Fetcher<'a, S> {
    pub fn new(source: &'a S, progress: ProgressBar) -> Self {
        Fetcher { source, progress }
    }

    /// Fetch every page, in the order the service returns them
    pub async fn fetch_all(&self, params: QueryParams) -> Result<Vec<LogEvent>, LogsError> {
        let result = self.pages(params).await;
        self.progress.finish_and_clear();
        result
    }

    async fn pages(&self, mut params: QueryParams) -> Result<Vec<LogEvent>, LogsError> {
        let mut events = Vec::new();
        let mut page_number = 0;

        loop {
            page_number += 1;

            self.progress.set_message(format!(
                "Fetching page {page_number} ({} events so far)",
                events.len()
            ));

            let page = self.source.filter_log_events(&params).await?;

            log::debug!(
                "Page {page_number} of {}: {} event(s), more: {}",
                params.log_group_name,
                page.events.len(),
                page.continuation_token.is_some()
            );

            events.extend(page.events);

            match page.continuation_token {
                Some(token) => params.continuation_token = Some(token),
                None => break,
            }
        }

        Ok(events)
    }
}

/// Fetch all events of the window and print the report
///
/// Returns the number of events retrieved.
pub(crate) async fn fetch_and_render<S: EventSource>(
    source: &S,
    config: &Config,
    window: &TimeWindow,
    palette: &dyn Palette,
    writer: &Writer,
    progress: ProgressBar,
) -> Result<usize, Error> {
    let params = QueryParams {
        log_group_name: config.log_group.clone(),
        start_ms: window.start_ms(),
        end_ms: window.end_ms(),
        filter_pattern: config.filter_pattern.clone(),
        continuation_token: None,
    };

    let events = Fetcher::new(source, progress).fetch_all(params).await?;

    let report = Report {
        config,
        window,
        events: &events,
    };

    if config.structured {
        writer.json(report.json())?;
    } else {
        writer.text(&report.text(palette))?;
    }

    Ok(events.len())
}
