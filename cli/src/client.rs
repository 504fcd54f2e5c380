use crate::api::logs::{LogEvent, Page, QueryParams};
use crate::error::LogsError;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_cloudwatchlogs::error::DisplayErrorContext;

/// Anything able to answer a paginated "filter log events" query
pub(crate) trait EventSource {
    /// Fetch one page of events
    async fn filter_log_events(&self, params: &QueryParams) -> Result<Page, LogsError>;
}

/// CloudWatch Logs client wrapper
pub(crate) struct Client {
    client: aws_sdk_cloudwatchlogs::Client,
}

impl Client {
    /// Load AWS config from the usual chain, narrowed to a profile and/or region when given
    pub async fn new(profile: Option<&str>, region: Option<&str>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(profile) = profile {
            log::info!("Using AWS profile {profile}");
            loader = loader.profile_name(profile);
        }

        if let Some(region) = region {
            log::info!("Using AWS region {region}");
            loader = loader.region(Region::new(region.to_owned()));
        }

        let config = loader.load().await;

        Client {
            client: aws_sdk_cloudwatchlogs::Client::new(&config),
        }
    }
}

impl EventSource for Client {
    async fn filter_log_events(&self, params: &QueryParams) -> Result<Page, LogsError> {
        let response = self
            .client
            .filter_log_events()
            .log_group_name(&params.log_group_name)
            .start_time(params.start_ms)
            .end_time(params.end_ms)
            .set_filter_pattern(params.filter_pattern.clone())
            .set_next_token(params.continuation_token.clone())
            .send()
            .await
            .inspect_err(|e| {
                log::error!(
                    "FilterLogEvents failed for {}: {e:?}",
                    params.log_group_name
                )
            })
            .map_err(|e| LogsError::Transport(DisplayErrorContext(&e).to_string()))?;

        let events = response
            .events()
            .iter()
            .map(|event| LogEvent {
                timestamp_ms: event.timestamp().unwrap_or_default(),
                ingestion_time_ms: event.ingestion_time(),
                message: event.message().unwrap_or_default().to_owned(),
            })
            .collect();

        Ok(Page {
            events,
            continuation_token: response.next_token().map(str::to_owned),
        })
    }
}
