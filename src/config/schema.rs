//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the sentiment gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address, request deadline).
    pub listener: ListenerConfig,

    /// Remote inference service settings.
    pub inference: InferenceConfig,

    /// Circuit breaker thresholds.
    pub circuit_breaker: CircuitBreakerConfig,

    /// Local fallback scorer selection.
    pub fallback: FallbackConfig,

    /// Input limits enforced before any scoring happens.
    pub limits: LimitsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    #[serde(default)]
    pub admin: AdminConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    pub bind_address: String,

    /// Upper bound on a whole HTTP request, in seconds. Must leave room for
    /// the remote batch deadline plus fallback scoring.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
            request_timeout_secs: 75,
        }
    }
}

/// Remote inference service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Base URL of the inference service (e.g., "http://ml-service:8001").
    pub base_url: String,

    /// Deadline for a single prediction call in milliseconds.
    /// Batch calls get twice this value.
    pub request_timeout_ms: u64,

    /// TCP connect timeout in milliseconds.
    pub connect_timeout_ms: u64,

    /// Deadline for the liveness probe in milliseconds.
    pub health_timeout_ms: u64,

    /// How long a probe result is reused, in milliseconds (0 = never cached).
    pub health_cache_ms: u64,

    /// Model requested when the caller does not name one.
    pub default_model: String,
}

impl InferenceConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn batch_timeout(&self) -> Duration {
        self.request_timeout() * 2
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn health_timeout(&self) -> Duration {
        Duration::from_millis(self.health_timeout_ms)
    }

    pub fn health_cache(&self) -> Duration {
        Duration::from_millis(self.health_cache_ms)
    }
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8001".to_string(),
            request_timeout_ms: 30_000,
            connect_timeout_ms: 5_000,
            health_timeout_ms: 5_000,
            health_cache_ms: 30_000,
            default_model: "default".to_string(),
        }
    }
}

/// Circuit breaker configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CircuitBreakerConfig {
    /// Consecutive failures before the breaker opens.
    pub failure_threshold: u32,

    /// Seconds the breaker stays open before a probe is allowed.
    pub open_timeout_secs: u64,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 3,
            open_timeout_secs: 300,
        }
    }
}

/// Which local scorer backs the fallback path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScorerKind {
    Lexicon,
    Minimal,
}

/// Fallback configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FallbackConfig {
    /// Scorer used when the remote service is unavailable.
    pub scorer: ScorerKind,

    /// Optional lexicon file (VADER tab-separated format).
    /// The builtin table is used when absent.
    pub lexicon_path: Option<PathBuf>,

    /// Longest text, in tokens, the lexicon scorer accepts.
    pub max_tokens: usize,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            scorer: ScorerKind::Lexicon,
            lexicon_path: None,
            max_tokens: 5_000,
        }
    }
}

/// Input limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum number of texts in one batch request.
    pub max_batch_size: usize,

    /// Maximum characters in one text.
    pub max_text_chars: usize,

    /// Characters of the input echoed back in results.
    pub display_text_chars: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_batch_size: 100,
            max_text_chars: 5_000,
            display_text_chars: 100,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Admin endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Enable admin routes (status, circuit breaker reset). Off unless a key
    /// is configured.
    pub enabled: bool,

    /// API key for authentication (Bearer token).
    pub api_key: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: String::new(),
        }
    }
}
