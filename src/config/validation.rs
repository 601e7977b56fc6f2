//! Configuration validation.
//!
//! Semantic checks only; serde already handled syntax. Every violation is
//! collected so an operator can fix a config file in one pass.

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::ServiceConfig;

/// Time the gateway keeps after the remote batch deadline to score the batch
/// locally and write the response.
pub const FALLBACK_HEADROOM_MS: u64 = 1_000;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a parsed configuration, returning all errors found.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }
    if config.listener.request_timeout_secs == 0 {
        errors.push(ValidationError::new("listener.request_timeout_secs", "must be greater than 0"));
    }

    let inference = &config.inference;
    match Url::parse(&inference.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::new(
            "inference.base_url",
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new(
            "inference.base_url",
            format!("'{}' is not a URL: {}", inference.base_url, e),
        )),
    }
    for (field, value) in [
        ("inference.request_timeout_ms", inference.request_timeout_ms),
        ("inference.connect_timeout_ms", inference.connect_timeout_ms),
        ("inference.health_timeout_ms", inference.health_timeout_ms),
    ] {
        if value == 0 {
            errors.push(ValidationError::new(field, "must be greater than 0"));
        }
    }
    // The listener timeout drops the handler future; it must never fire
    // before the remote deadline has been turned into a fallback answer.
    let listener_ms = config.listener.request_timeout_secs.saturating_mul(1_000);
    let batch_ms = inference.request_timeout_ms.saturating_mul(2);
    if config.listener.request_timeout_secs > 0 && listener_ms < batch_ms.saturating_add(FALLBACK_HEADROOM_MS) {
        errors.push(ValidationError::new(
            "listener.request_timeout_secs",
            format!(
                "{}ms does not cover the {}ms batch deadline plus {}ms for fallback scoring",
                listener_ms, batch_ms, FALLBACK_HEADROOM_MS
            ),
        ));
    }
    if inference.default_model.trim().is_empty() {
        errors.push(ValidationError::new("inference.default_model", "must not be empty"));
    }

    if config.circuit_breaker.failure_threshold == 0 {
        errors.push(ValidationError::new("circuit_breaker.failure_threshold", "must be at least 1"));
    }
    if config.circuit_breaker.open_timeout_secs == 0 {
        errors.push(ValidationError::new("circuit_breaker.open_timeout_secs", "must be greater than 0"));
    }

    if config.fallback.max_tokens == 0 {
        errors.push(ValidationError::new("fallback.max_tokens", "must be at least 1"));
    }

    for (field, value) in [
        ("limits.max_batch_size", config.limits.max_batch_size),
        ("limits.max_text_chars", config.limits.max_text_chars),
        ("limits.display_text_chars", config.limits.display_text_chars),
    ] {
        if value == 0 {
            errors.push(ValidationError::new(field, "must be at least 1"));
        }
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if config.admin.enabled && config.admin.api_key.trim().is_empty() {
        errors.push(ValidationError::new("admin.api_key", "must be set when admin routes are enabled"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ServiceConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = ServiceConfig::default();
        config.inference.base_url = "ftp://models".into();
        config.circuit_breaker.failure_threshold = 0;
        config.limits.max_batch_size = 0;
        config.admin.enabled = true;
        config.admin.api_key = "  ".into();

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "inference.base_url",
                "circuit_breaker.failure_threshold",
                "limits.max_batch_size",
                "admin.api_key",
            ]
        );
        assert!(errors[0].to_string().contains("unsupported scheme 'ftp'"));
    }

    #[test]
    fn test_listener_timeout_must_cover_batch_deadline() {
        let mut config = ServiceConfig::default();
        config.listener.request_timeout_secs = 60;
        config.inference.request_timeout_ms = 30_000;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "listener.request_timeout_secs");
        assert!(errors[0].to_string().contains("60000ms batch deadline"));

        config.listener.request_timeout_secs = 61;
        assert!(validate_config(&config).is_ok());

        config.listener.request_timeout_secs = 2;
        config.inference.request_timeout_ms = 400;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_admin_needs_key_only_when_enabled() {
        let mut config = ServiceConfig::default();
        assert!(validate_config(&config).is_ok(), "admin is off by default");

        config.admin.enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "admin.api_key");

        config.admin.api_key = "a-real-secret".into();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = ServiceConfig::default();
        config.observability.metrics_address = "not-an-address".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "observability.metrics_address");
    }
}
