use crate::client::Client;
use crate::commands::QueryArgs;
use crate::config::Config;
use crate::error::{Error, LogsError};
use crate::logger::Logger;
use crate::logs;
use crate::render;
use crate::window::WindowMode;
use crate::writer::Writer;
use std::error::Error as StdError;

pub(crate) trait Runner {
    /// Construct the CloudWatch Logs client for the configured profile and region
    async fn logs_client(&self, config: &Config) -> Client {
        Client::new(config.profile.as_deref(), config.region.as_deref()).await
    }

    /// Resolve the window, then fetch and print the events
    ///
    /// Everything is validated before AWS config is loaded.
    async fn report(&self, args: &QueryArgs, mode: &WindowMode) -> Result<usize, Error> {
        let window = mode.resolve().map_err(|e| self.failure(e))?;
        let config = args.config().map_err(|e| self.failure(e))?;

        log::info!(
            "Resolved window {} [{}, {}) for {}",
            window.description(),
            window.start_ms(),
            window.end_ms(),
            config.log_group
        );

        let client = self.logs_client(&config).await;
        let writer = Writer::new(config.structured);
        let palette = render::palette(config.color);

        logs::fetch_and_render(
            &client,
            &config,
            &window,
            palette.as_ref(),
            &writer,
            Logger::spinner(),
        )
        .await
    }

    /// Run the command
    ///
    /// Returns an error shown to the user in case of failure
    async fn run(&mut self) -> Result<(), Error>;

    /// Construct an error shown to the user
    fn error(
        &self,
        title: Option<&str>,
        description: Option<&str>,
        origin: Option<Box<dyn StdError>>,
    ) -> Error {
        if let Some(origin) = origin {
            log::error!("{origin:?}");
        }

        if let Some(title) = title {
            Error::new(title, description)
        } else {
            Error::new("Failed to run the command", Some("Run again with RUST_LOG=debug for details."))
        }
    }

    /// A shortcut to turn a pipeline failure into the error shown to the user
    fn failure(&self, error: LogsError) -> Error {
        let (title, description) = error.describe();
        self.error(Some(title), Some(&description), Some(Box::new(error)))
    }
}

/// Return a runner for a command
pub(crate) trait Runnable {
    fn runner(&self) -> impl Runner;
}
