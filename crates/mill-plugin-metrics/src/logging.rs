//! Tracing subscriber setup for hosts that embed the metrics crate

use crate::config::{LogFormat, LoggingConfig};
use crate::error::{MetricsError, MetricsResult};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Level used when neither `RUST_LOG` nor the configured level parses
const FALLBACK_LEVEL: &str = "info";

/// Install a global subscriber writing to stderr
///
/// `RUST_LOG`, when set and valid, replaces `config.level` entirely.
/// `LOG_FORMAT` (`json`, `pretty` or `human`) replaces `config.format`.
/// Fails if a global subscriber is already installed.
pub fn initialize(config: &LoggingConfig) -> MetricsResult<()> {
    let filter = level_filter(config);
    let format = format_override(std::env::var("LOG_FORMAT").ok().as_deref())
        .unwrap_or_else(|| config.format.clone());

    let output = match format {
        LogFormat::Json => fmt::layer().json().with_writer(std::io::stderr).boxed(),
        LogFormat::Pretty => fmt::layer().pretty().with_writer(std::io::stderr).boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(output)
        .try_init()
        .map_err(|e| MetricsError::Logging(e.to_string()))
}

fn level_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new(FALLBACK_LEVEL))
}

fn format_override(value: Option<&str>) -> Option<LogFormat> {
    match value?.to_lowercase().as_str() {
        "json" => Some(LogFormat::Json),
        "pretty" | "human" => Some(LogFormat::Pretty),
        _ => None,
    }
}

/// Span wrapping one inventory report tick
pub fn report_span(tick: u64) -> tracing::Span {
    tracing::info_span!("inventory_report", tick = tick)
}
