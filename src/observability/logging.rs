//! Structured logging.
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - JSON format for production, pretty format for development
//! - `RUST_LOG` wins over the configured level when set

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, ObservabilityConfig};

/// Install the global subscriber. Call once, before anything logs.
pub fn init(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(&config.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .init(),
    }
}

/// Targets enabled at the configured level when `RUST_LOG` is unset: the
/// library, the gateway binary and the HTTP middleware.
const LOG_TARGETS: &[&str] = &["sentiment_failsafe", "sentiment_gateway", "tower_http"];

fn default_filter(level: &str) -> EnvFilter {
    let level = level.parse::<LevelFilter>().unwrap_or(LevelFilter::INFO);
    let directives = LOG_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",");
    EnvFilter::new(directives)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_accepts_levels() {
        assert!(default_filter("debug").to_string().contains("sentiment_failsafe=debug"));
    }

    #[test]
    fn test_gateway_binary_target_is_enabled() {
        let filter = default_filter("info").to_string();
        assert!(filter.contains("sentiment_gateway=info"), "filter was {filter}");
        assert!(filter.contains("sentiment_failsafe=info"));
    }

    #[test]
    fn test_invalid_level_falls_back_to_info() {
        let filter = default_filter("not a level!").to_string();
        assert!(filter.contains("sentiment_gateway=info"), "filter was {filter}");
    }
}
