//! Metrics collection and exposition.
//!
//! # Metrics
//! - `sentiment_predictions_total` (counter): predictions by provenance
//! - `sentiment_prediction_duration_seconds` (histogram): latency by provenance
//! - `sentiment_remote_failures_total` (counter): remote failures by kind
//! - `sentiment_breaker_state` (gauge): 0=healthy, 1=degraded, 2=failed
//! - `sentiment_batch_size` (histogram): texts per batch by method
//!
//! # Design Decisions
//! - Thin `record_*` helpers keep metric names in one file
//! - Provenance and failure kind are the only labels (bounded cardinality)

use std::net::SocketAddr;
use std::time::Duration;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::inference::types::Provenance;
use crate::resilience::HealthState;

/// Start the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Prometheus exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install Prometheus exporter"),
    }
}

pub fn record_prediction(provenance: Provenance, elapsed: Duration) {
    let label = provenance.as_str();
    metrics::counter!("sentiment_predictions_total", "provenance" => label).increment(1);
    metrics::histogram!("sentiment_prediction_duration_seconds", "provenance" => label)
        .record(elapsed.as_secs_f64());
}

pub fn record_batch(method: Provenance, size: usize) {
    metrics::histogram!("sentiment_batch_size", "method" => method.as_str()).record(size as f64);
}

pub fn record_remote_failure(kind: &'static str) {
    metrics::counter!("sentiment_remote_failures_total", "kind" => kind).increment(1);
}

pub fn record_breaker_state(state: HealthState) {
    let value = match state {
        HealthState::Healthy => 0.0,
        HealthState::Degraded => 1.0,
        HealthState::Failed => 2.0,
    };
    metrics::gauge!("sentiment_breaker_state").set(value);
}
