//! Best-effort liveness probe of the inference service.
//!
//! # Responsibilities
//! - `GET /health` under its own short timeout
//! - Cache the last report so bursts of status calls cost one request
//! - Never feed the circuit breaker: a failed probe is reported, not counted

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;

use crate::inference::remote::InferenceService;
use crate::inference::types::duration_ms;

/// Outcome of one liveness probe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeReport {
    pub reachable: bool,
    /// JSON payload of the health endpoint, when it returned one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub latency_ms: f64,
    pub checked_at: DateTime<Utc>,
    /// True when served from the cache instead of a fresh request.
    pub cached: bool,
}

#[derive(Debug)]
pub struct HealthProbe {
    service: InferenceService,
    timeout: Duration,
    cache_ttl: Duration,
    last: Mutex<Option<(Instant, ProbeReport)>>,
}

impl HealthProbe {
    pub fn new(service: InferenceService, timeout: Duration, cache_ttl: Duration) -> Self {
        Self {
            service,
            timeout,
            cache_ttl,
            last: Mutex::new(None),
        }
    }

    /// Return a fresh or cached report. Concurrent callers queue on the cache
    /// lock, so at most one request is in flight.
    pub async fn check(&self) -> ProbeReport {
        let mut last = self.last.lock().await;

        if let Some((at, report)) = last.as_ref() {
            if at.elapsed() < self.cache_ttl {
                return ProbeReport {
                    cached: true,
                    ..report.clone()
                };
            }
        }

        let report = self.probe().await;
        *last = Some((Instant::now(), report.clone()));
        report
    }

    /// Drop the cached report so the next check hits the service.
    pub async fn invalidate(&self) {
        *self.last.lock().await = None;
    }

    async fn probe(&self) -> ProbeReport {
        let started = Instant::now();
        let outcome = self.service.health(self.timeout).await;
        let latency_ms = duration_ms(started.elapsed());

        match outcome {
            Ok(details) => {
                tracing::debug!(latency_ms, "Inference service health probe succeeded");
                ProbeReport {
                    reachable: true,
                    details,
                    error: None,
                    latency_ms,
                    checked_at: Utc::now(),
                    cached: false,
                }
            }
            Err(e) => {
                tracing::warn!(
                    url = %self.service.base_url(),
                    error = %e,
                    kind = e.kind(),
                    "Inference service health probe failed"
                );
                ProbeReport {
                    reachable: false,
                    details: None,
                    error: Some(e.to_string()),
                    latency_ms,
                    checked_at: Utc::now(),
                    cached: false,
                }
            }
        }
    }
}
