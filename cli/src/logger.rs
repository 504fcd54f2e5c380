use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use indicatif_log_bridge::LogWrapper;
use std::sync::OnceLock;
use std::time::Duration;

/// Set up log levels, formatting, and other configurations for the logger
pub struct Logger {
    multi_progress: MultiProgress,
}

static LOGGER: OnceLock<Logger> = OnceLock::new();

impl<'a> Logger {
    pub fn init() -> &'a Self {
        LOGGER.get_or_init(|| {
            let logger = env_logger::Builder::from_env(
                // No logs shown by default, only the report itself
                // Enable logs output with "export RUST_LOG=debug" in terminal
                env_logger::Env::default().default_filter_or("off"),
            )
            .build();

            let level = logger.filter();
            let multi_progress = MultiProgress::new();

            // Log lines are printed above the spinner instead of tearing it
            if let Err(e) = LogWrapper::new(multi_progress.clone(), logger).try_init() {
                eprintln!("Failed to initialize logger: {e}");
            }

            log::set_max_level(level);
            Self { multi_progress }
        })
    }

    pub fn multi_progress() -> &'a MultiProgress {
        &Self::init().multi_progress
    }

    /// Spinner attached to the shared progress area (stderr)
    pub fn spinner() -> ProgressBar {
        let spinner = Self::multi_progress().add(ProgressBar::new_spinner());

        spinner.set_style(
            ProgressStyle::with_template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );

        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }
}
