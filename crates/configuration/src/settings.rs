use crate::error::ConfigError;
use chrono::NaiveDate;
use core_types::{BoundaryPolicy, DateRange};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// The root configuration structure for the entire application.
///
/// Every section has defaults, so an empty file (or no file at all) is valid.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub filters: FilterSettings,
    pub display: DisplaySettings,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

/// Where to find the results API and how long to wait for it.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the results API, without a trailing path (e.g. "http://localhost:5000").
    pub base_url: String,
    /// Per-request timeout, in seconds.
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout_secs: 10,
        }
    }
}

/// The dashboard's filter state: date window, keyword, and the events toggle.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Case-insensitive substring matched against event descriptions.
    pub keyword: String,
    /// When false the matched-events panel is hidden entirely.
    pub show_events: bool,
    /// Keep points that fall exactly on a bound. Off by default.
    pub inclusive_bounds: bool,
}

impl FilterSettings {
    pub fn date_range(&self) -> DateRange {
        let policy = if self.inclusive_bounds {
            BoundaryPolicy::Inclusive
        } else {
            BoundaryPolicy::Exclusive
        };
        DateRange::new(self.start_date, self.end_date).with_policy(policy)
    }
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            start_date: None,
            end_date: None,
            keyword: String::new(),
            show_events: true,
            inclusive_bounds: false,
        }
    }
}

/// How results are written to the terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    /// Boxed tables, numbers rounded for reading.
    #[default]
    Table,
    /// The full view as JSON, at full precision.
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Decimal places for the summary metrics.
    pub decimals: usize,
    /// Decimal places for the impact column.
    pub impact_decimals: usize,
    pub format: OutputFormat,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            decimals: 5,
            impact_decimals: 2,
            format: OutputFormat::Table,
        }
    }
}

/// Settings for the local results server.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// Holds `change_points.csv` and `matched_events.csv`.
    pub results_dir: PathBuf,
    /// Holds `brent_oil_log_returns.csv`.
    pub processed_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 5000)),
            results_dir: PathBuf::from("results"),
            processed_dir: PathBuf::from("data/processed"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// An `EnvFilter` directive. `RUST_LOG` takes precedence when set.
    pub level: String,
    /// When set, logs go to a daily rolling file in this directory instead of stderr.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

impl Config {
    /// Checks the invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "api.base_url must not be empty".to_string(),
            ));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "api.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.display.decimals > 12 || self.display.impact_decimals > 12 {
            return Err(ConfigError::ValidationError(
                "display decimals must be at most 12".to_string(),
            ));
        }
        if let (Some(start), Some(end)) = (self.filters.start_date, self.filters.end_date) {
            if start > end {
                return Err(ConfigError::ValidationError(format!(
                    "filters.start_date ({start}) is after filters.end_date ({end})"
                )));
            }
        }
        Ok(())
    }
}
