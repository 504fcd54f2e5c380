use crate::error::LogsError;
use eyre::WrapErr;
use serde::Deserialize;
use std::path::Path;

/// Defaults file looked up in the current directory
pub const DEFAULTS_FILE: &str = "cwlogs.toml";

/// Optional settings from one source (CLI/env or the defaults file)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Layer {
    pub log_group: Option<String>,
    pub filter_pattern: Option<String>,
    pub profile: Option<String>,
    pub region: Option<String>,
}

impl Layer {
    /// Read the defaults file
    ///
    /// A missing file is only an error when the path was given explicitly.
    pub fn from_path(path: &Path, explicit: bool) -> eyre::Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if !explicit && e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No defaults file at {path:?}");
                return Ok(Layer::default());
            }
            Err(e) => {
                log::error!("Failed to read {path:?}: {e:?}");
                return Err(e).wrap_err(format!("Failed to read {}", path.display()));
            }
        };

        toml::from_str(&content)
            .inspect_err(|e| log::error!("Failed to parse {path:?}: {e:?}"))
            .wrap_err(format!("Failed to parse {}", path.display()))
    }

    /// Fill the gaps of this layer from a lower priority one
    ///
    /// Blank values count as missing.
    pub fn or(self, fallback: Layer) -> Layer {
        let pick = |value: Option<String>, fallback: Option<String>| {
            value
                .filter(|v| !v.trim().is_empty())
                .or(fallback.filter(|v| !v.trim().is_empty()))
        };

        Layer {
            log_group: pick(self.log_group, fallback.log_group),
            filter_pattern: pick(self.filter_pattern, fallback.filter_pattern),
            profile: pick(self.profile, fallback.profile),
            region: pick(self.region, fallback.region),
        }
    }
}

/// Everything a single run needs besides the time window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_group: String,
    pub filter_pattern: Option<String>,
    pub profile: Option<String>,
    pub region: Option<String>,

    /// Print a JSON document instead of the text report
    pub structured: bool,

    pub color: bool,
}

impl Config {
    pub fn new(layer: Layer, structured: bool, color: bool) -> Result<Self, LogsError> {
        let log_group = layer.log_group.ok_or_else(|| {
            LogsError::Config(format!(
                "Log group is required. Pass it as an argument, set LOG_GROUP_NAME or add log_group to {DEFAULTS_FILE}."
            ))
        })?;

        Ok(Config {
            log_group,
            filter_pattern: layer.filter_pattern,
            profile: layer.profile,
            region: layer.region,
            structured,
            // Escape codes would break the JSON output
            color: color && !structured,
        })
    }
}
