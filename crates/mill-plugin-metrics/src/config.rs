//! Configuration for plugin registration metrics

use crate::error::{MetricsError, MetricsResult};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Reporting period used when nothing else is configured
pub const DEFAULT_REPORT_INTERVAL: Duration = Duration::from_secs(10);

/// Longest accepted reporting period (one day)
pub const MAX_REPORT_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Environment variable prefix; nested keys are separated by `__`
const ENV_PREFIX: &str = "MILL_METRICS__";

/// Config files searched by [`MetricsConfig::load`], lowest priority first
const CONFIG_PATHS: [&str; 2] = [".mill/plugin-metrics.toml", "plugin-metrics.toml"];

/// Plugin metrics configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Whether the periodic reporter should run
    pub enabled: bool,
    /// Seconds between inventory reports
    pub report_interval_secs: u64,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            report_interval_secs: DEFAULT_REPORT_INTERVAL.as_secs(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format for development
    #[default]
    Pretty,
    /// Structured JSON format for production
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl MetricsConfig {
    /// Load configuration from the working directory and environment
    ///
    /// Priority order (highest to lowest):
    /// 1. Environment variables (`MILL_METRICS__*`)
    /// 2. `plugin-metrics.toml`
    /// 3. `.mill/plugin-metrics.toml`
    /// 4. Default values
    pub fn load() -> MetricsResult<Self> {
        let mut figment = Figment::from(Serialized::defaults(MetricsConfig::default()));

        for toml_path in CONFIG_PATHS {
            let path = Path::new(toml_path);
            if path.exists() {
                tracing::info!(path = %toml_path, "Loading plugin metrics configuration");
                figment = figment.merge(Toml::file(path));
            }
        }

        let config: MetricsConfig = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific TOML file layered over defaults
    pub fn load_from(path: &Path) -> MetricsResult<Self> {
        if !path.exists() {
            return Err(MetricsError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        tracing::debug!(path = %path.display(), "Loading plugin metrics configuration");

        let config: MetricsConfig = Figment::from(Serialized::defaults(MetricsConfig::default()))
            .merge(Toml::file(path))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// Check invariants that serde cannot express
    pub fn validate(&self) -> MetricsResult<()> {
        check_interval(self.report_interval())
    }

    pub fn report_interval(&self) -> Duration {
        Duration::from_secs(self.report_interval_secs)
    }
}

/// Reject periods the reporter cannot schedule: zero, or longer than
/// [`MAX_REPORT_INTERVAL`]
pub(crate) fn check_interval(period: Duration) -> MetricsResult<()> {
    if period.is_zero() || period > MAX_REPORT_INTERVAL {
        return Err(MetricsError::InvalidInterval(period));
    }
    Ok(())
}
