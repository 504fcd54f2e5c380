pub mod absolute;
pub mod relative;
use crate::config::{Config, Layer, DEFAULTS_FILE};
use crate::error::LogsError;
use clap::{ArgAction, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Fetch events for a window of the given length, ending now or on a chosen day
    Relative(relative::RelativeCommand),

    /// Fetch events between two ISO-8601 UTC timestamps
    Absolute(absolute::AbsoluteCommand),
}

/// Options shared by all fetch commands
#[derive(clap::Args, Clone, Debug)]
pub(crate) struct QueryArgs {
    /// Log group to read events from
    #[arg(env = "LOG_GROUP_NAME")]
    log_group: Option<String>,

    /// CloudWatch Logs filter pattern, e.g. `ERROR` or `{ $.level = "error" }`
    #[arg(short, long, env = "FILTER_PATTERN")]
    filter_pattern: Option<String>,

    /// AWS profile to use instead of the default credentials chain
    #[arg(short, long, env = "AWS_PROFILE")]
    profile: Option<String>,

    /// AWS region of the log group
    #[arg(short, long, env = "AWS_REGION")]
    region: Option<String>,

    /// Print a JSON document instead of the text report
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,

    /// Do not decorate the report with colors
    #[arg(long, action = ArgAction::SetTrue)]
    no_color: bool,

    /// Defaults file (TOML with log_group, filter_pattern, profile, region)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
}

impl QueryArgs {
    /// Layer arguments (and their env fallbacks) over the defaults file
    pub fn config(&self) -> Result<Config, LogsError> {
        let defaults = match &self.config {
            Some(path) => Layer::from_path(path, true),
            None => Layer::from_path(Path::new(DEFAULTS_FILE), false),
        }
        .map_err(|e| LogsError::Config(format!("{e:#}")))?;

        let layer = Layer {
            log_group: self.log_group.clone(),
            filter_pattern: self.filter_pattern.clone(),
            profile: self.profile.clone(),
            region: self.region.clone(),
        }
        .or(defaults);

        let color = !self.no_color && console::colors_enabled();
        Config::new(layer, self.json, color)
    }
}
