//! Fail-safe inference client.
//!
//! # Data Flow
//! ```text
//! predict(text)
//!     → validate input (the only error path)
//!     → CircuitBreaker::admit
//!         Attempt | Probe → remote call under deadline
//!             200 + valid body → Success event → remote result
//!             anything else    → Failure event → FallbackEngine
//!         Reject              → FallbackEngine ("circuit breaker open")
//! ```
//!
//! # Design Decisions
//! - Upstream unavailability is data (`provenance`, `fallback_reason`), never an error
//! - A batch takes one breaker decision and one remote call, with twice the
//!   single-item timeout
//! - No retries inside one call; the caller owns retry policy

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::ServiceConfig;
use crate::fallback::FallbackEngine;
use crate::health::{HealthProbe, ProbeReport};
use crate::inference::error::{InputError, RemoteError, SetupError};
use crate::inference::remote::{InferenceService, RemoteBatchResponse, RemotePrediction};
use crate::inference::types::{
    display_text, duration_ms, round3, BatchBuilder, BatchResult, PredictionResult, Provenance,
};
use crate::observability::metrics;
use crate::resilience::{Admission, BreakerPolicy, BreakerSnapshot, CircuitBreaker, HealthState};

/// Per-client knobs resolved once from configuration.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub default_model: String,
    pub request_timeout: Duration,
    pub batch_timeout: Duration,
    pub max_batch_size: usize,
    pub max_text_chars: usize,
    pub display_text_chars: usize,
}

impl From<&ServiceConfig> for ClientSettings {
    fn from(config: &ServiceConfig) -> Self {
        Self {
            default_model: config.inference.default_model.clone(),
            request_timeout: config.inference.request_timeout(),
            batch_timeout: config.inference.batch_timeout(),
            max_batch_size: config.limits.max_batch_size,
            max_text_chars: config.limits.max_text_chars,
            display_text_chars: config.limits.display_text_chars,
        }
    }
}

/// Remote half of the status record.
#[derive(Debug, Clone, Serialize)]
pub struct RemoteStatus {
    pub base_url: String,
    #[serde(flatten)]
    pub probe: ProbeReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct FallbackStatus {
    /// Whether a lexicon (not just the minimal scorer) is loaded.
    pub available: bool,
    pub scorer: &'static str,
    pub provenance: Provenance,
    /// Requests are currently routed to fallback without trying the remote.
    pub active: bool,
}

/// Answer of `get_service_status`.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceStatus {
    pub remote_service: RemoteStatus,
    pub circuit_breaker: BreakerSnapshot,
    pub fallback: FallbackStatus,
    pub timestamp: DateTime<Utc>,
}

/// Circuit-breaker-guarded client with local fallback.
#[derive(Debug)]
pub struct FailSafeClient {
    remote: InferenceService,
    breaker: CircuitBreaker,
    fallback: FallbackEngine,
    probe: HealthProbe,
    settings: ClientSettings,
}

impl FailSafeClient {
    /// Build a client with the fallback scorer selected from `config.fallback`.
    pub fn new(config: &ServiceConfig) -> Result<Self, SetupError> {
        let fallback = FallbackEngine::from_config(&config.fallback, config.limits.display_text_chars);
        Self::with_fallback(config, fallback)
    }

    pub fn with_fallback(config: &ServiceConfig, fallback: FallbackEngine) -> Result<Self, SetupError> {
        let remote = InferenceService::new(&config.inference)?;
        let probe = HealthProbe::new(
            remote.clone(),
            config.inference.health_timeout(),
            config.inference.health_cache(),
        );
        let breaker = CircuitBreaker::new(BreakerPolicy::from(&config.circuit_breaker));

        tracing::info!(
            base_url = %remote.base_url(),
            failure_threshold = breaker.policy().failure_threshold,
            open_timeout_secs = breaker.policy().open_timeout.as_secs(),
            fallback = fallback.scorer_name(),
            "Fail-safe inference client initialized"
        );

        Ok(Self {
            remote,
            breaker,
            fallback,
            probe,
            settings: ClientSettings::from(config),
        })
    }

    pub fn breaker(&self) -> &CircuitBreaker {
        &self.breaker
    }

    /// Predict sentiment for one text under the configured request timeout.
    pub async fn predict(
        &self,
        text: &str,
        model: Option<&str>,
        include_probabilities: bool,
    ) -> Result<PredictionResult, InputError> {
        self.predict_within(text, model, include_probabilities, self.settings.request_timeout)
            .await
    }

    /// Like `predict`, with a caller-supplied deadline for the remote call.
    pub async fn predict_within(
        &self,
        text: &str,
        model: Option<&str>,
        include_probabilities: bool,
        deadline: Duration,
    ) -> Result<PredictionResult, InputError> {
        self.validate_text(text)?;
        let model = self.resolve_model(model);

        if let Admission::Reject {
            consecutive_failures,
            ..
        } = self.breaker.admit()
        {
            let reason = breaker_open_reason(consecutive_failures);
            tracing::debug!(reason = %reason, "Skipping remote inference");
            return Ok(self
                .fallback
                .score(text, include_probabilities, &reason, HealthState::Failed));
        }

        let started = Instant::now();
        match self.remote.predict(text, model, include_probabilities, deadline).await {
            Ok(prediction) => {
                let state = self.breaker.record_success();
                let elapsed = started.elapsed();
                metrics::record_prediction(Provenance::RemoteService, elapsed);
                Ok(self.remote_result(text, model, prediction, include_probabilities, elapsed, state))
            }
            Err(e) => {
                let state = self.record_remote_failure(&e, "predict");
                let reason = remote_error_reason(&e);
                Ok(self.fallback.score(text, include_probabilities, &reason, state))
            }
        }
    }

    /// Predict sentiment for many texts with a single breaker decision.
    pub async fn predict_batch(
        &self,
        texts: &[String],
        model: Option<&str>,
        include_probabilities: bool,
    ) -> Result<BatchResult, InputError> {
        self.validate_batch(texts)?;
        let model = self.resolve_model(model);

        if let Admission::Reject {
            consecutive_failures,
            ..
        } = self.breaker.admit()
        {
            let reason = breaker_open_reason(consecutive_failures);
            return Ok(self
                .fallback
                .score_batch(texts, include_probabilities, &reason, HealthState::Failed));
        }

        let started = Instant::now();
        match self
            .remote
            .predict_batch(texts, model, include_probabilities, self.settings.batch_timeout)
            .await
        {
            Ok(response) => {
                let state = self.breaker.record_success();
                let batch = self.remote_batch(texts, model, response, include_probabilities, started, state);
                tracing::debug!(
                    batch_id = %batch.batch_id,
                    total = batch.summary.total,
                    failed = batch.summary.failed,
                    "Remote batch completed"
                );
                Ok(batch)
            }
            Err(e) => {
                let state = self.record_remote_failure(&e, "predict_batch");
                let reason = remote_error_reason(&e);
                Ok(self
                    .fallback
                    .score_batch(texts, include_probabilities, &reason, state))
            }
        }
    }

    /// Report remote liveness, breaker state and fallback readiness.
    ///
    /// Never fails and never changes the breaker.
    pub async fn get_service_status(&self) -> ServiceStatus {
        let probe = self.probe.check().await;
        let breaker = self.breaker.snapshot();
        let fallback = FallbackStatus {
            available: self.fallback.lexicon_available(),
            scorer: self.fallback.scorer_name(),
            provenance: self.fallback.provenance(),
            active: breaker.state == HealthState::Failed,
        };

        ServiceStatus {
            remote_service: RemoteStatus {
                base_url: self.remote.base_url().to_string(),
                probe,
            },
            circuit_breaker: breaker,
            fallback,
            timestamp: Utc::now(),
        }
    }

    /// Operator override: force the breaker back to Healthy.
    pub fn reset_circuit_breaker(&self) -> BreakerSnapshot {
        self.breaker.reset();
        self.breaker.snapshot()
    }

    fn resolve_model<'a>(&'a self, model: Option<&'a str>) -> &'a str {
        match model {
            Some(m) if !m.trim().is_empty() => m,
            _ => &self.settings.default_model,
        }
    }

    fn validate_text(&self, text: &str) -> Result<(), InputError> {
        if text.trim().is_empty() {
            return Err(InputError::EmptyText);
        }
        let len = text.chars().count();
        if len > self.settings.max_text_chars {
            return Err(InputError::TextTooLong {
                len,
                max: self.settings.max_text_chars,
            });
        }
        Ok(())
    }

    fn validate_batch(&self, texts: &[String]) -> Result<(), InputError> {
        if texts.is_empty() {
            return Err(InputError::EmptyBatch);
        }
        if texts.len() > self.settings.max_batch_size {
            return Err(InputError::BatchTooLarge {
                len: texts.len(),
                max: self.settings.max_batch_size,
            });
        }
        for (index, text) in texts.iter().enumerate() {
            self.validate_text(text).map_err(|e| InputError::InvalidItem {
                index,
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }

    fn record_remote_failure(&self, error: &RemoteError, operation: &'static str) -> HealthState {
        metrics::record_remote_failure(error.kind());
        let state = self.breaker.record_failure();
        tracing::warn!(
            operation,
            error = %error,
            kind = error.kind(),
            state = %state,
            "Remote inference failed, using fallback"
        );
        state
    }

    fn remote_result(
        &self,
        text: &str,
        model: &str,
        prediction: RemotePrediction,
        include_probabilities: bool,
        elapsed: Duration,
        state: HealthState,
    ) -> PredictionResult {
        PredictionResult {
            text: display_text(text, self.settings.display_text_chars),
            sentiment: prediction.sentiment,
            confidence: round3(prediction.confidence),
            compound_score: round3(prediction.compound_score),
            probabilities: if include_probabilities {
                prediction.probabilities.map(|p| p.rounded())
            } else {
                None
            },
            processing_time_ms: duration_ms(elapsed),
            provenance: Provenance::RemoteService,
            model_name: prediction.model_name.unwrap_or_else(|| model.to_string()),
            service_state: state,
            fallback_reason: None,
            timestamp: Utc::now(),
        }
    }

    fn remote_batch(
        &self,
        texts: &[String],
        model: &str,
        response: RemoteBatchResponse,
        include_probabilities: bool,
        started: Instant,
        state: HealthState,
    ) -> BatchResult {
        let mut builder = BatchBuilder::new(texts.len());
        let per_item = started.elapsed() / texts.len().max(1) as u32;

        for (index, mut prediction) in response.results.into_iter().enumerate() {
            // Positions only line up with the inputs when nothing failed;
            // otherwise the service has already echoed every text.
            let text = match prediction.text.take() {
                Some(echoed) => echoed,
                None => texts.get(index).cloned().unwrap_or_default(),
            };
            builder.push(self.remote_result(&text, model, prediction, include_probabilities, per_item, state));
        }

        metrics::record_batch(Provenance::RemoteService, texts.len());
        builder.finish(
            Provenance::RemoteService,
            response.summary.failed,
            started.elapsed(),
            None,
        )
    }
}

fn breaker_open_reason(consecutive_failures: u32) -> String {
    format!(
        "Circuit breaker open after {} consecutive failures",
        consecutive_failures
    )
}

fn remote_error_reason(error: &RemoteError) -> String {
    format!("Remote service error: {}", error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceConfig;
    use crate::inference::types::Sentiment;

    fn unreachable_config() -> ServiceConfig {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let mut config = ServiceConfig::default();
        config.inference.base_url = format!("http://{}", addr);
        config.inference.request_timeout_ms = 2_000;
        config.limits.max_batch_size = 3;
        config.limits.max_text_chars = 20;
        config
    }

    #[tokio::test]
    async fn test_input_validation() {
        let client = FailSafeClient::new(&unreachable_config()).unwrap();

        assert_eq!(client.predict("   ", None, false).await.unwrap_err(), InputError::EmptyText);
        assert_eq!(
            client.predict(&"x".repeat(21), None, false).await.unwrap_err(),
            InputError::TextTooLong { len: 21, max: 20 }
        );
        assert_eq!(client.predict_batch(&[], None, false).await.unwrap_err(), InputError::EmptyBatch);

        let too_many: Vec<String> = (0..4).map(|i| format!("text {}", i)).collect();
        assert_eq!(
            client.predict_batch(&too_many, None, false).await.unwrap_err(),
            InputError::BatchTooLarge { len: 4, max: 3 }
        );

        let with_blank = vec!["fine".to_string(), "".to_string()];
        assert!(matches!(
            client.predict_batch(&with_blank, None, false).await.unwrap_err(),
            InputError::InvalidItem { index: 1, .. }
        ));

        // Rejected input never reaches the breaker.
        assert_eq!(client.breaker().health().consecutive_failures(), 0);
    }

    #[tokio::test]
    async fn test_connection_failure_falls_back() {
        let client = FailSafeClient::new(&unreachable_config()).unwrap();

        let result = client.predict("I love this", None, true).await.unwrap();
        assert_eq!(result.provenance, Provenance::FallbackLexicon);
        assert_eq!(result.sentiment, Sentiment::Positive);
        assert_eq!(result.service_state, HealthState::Degraded);
        assert!(result
            .fallback_reason
            .as_deref()
            .is_some_and(|r| r.starts_with("Remote service error")));
        assert_eq!(client.breaker().health().consecutive_failures(), 1);
    }

    #[test]
    fn test_model_resolution() {
        let client = FailSafeClient::new(&unreachable_config()).unwrap();
        assert_eq!(client.resolve_model(None), "default");
        assert_eq!(client.resolve_model(Some(" ")), "default");
        assert_eq!(client.resolve_model(Some("roberta")), "roberta");
    }

    #[test]
    fn test_reset_returns_healthy_snapshot() {
        let client = FailSafeClient::new(&unreachable_config()).unwrap();
        for _ in 0..3 {
            client.breaker().record_failure();
        }
        assert_eq!(client.breaker().state(), HealthState::Failed);

        let snapshot = client.reset_circuit_breaker();
        assert_eq!(snapshot.state, HealthState::Healthy);
        assert_eq!(snapshot.consecutive_failures, 0);
        assert!(client.breaker().should_attempt_remote());
    }
}
