//! Circuit breaker guarding the remote inference service.
//!
//! # States
//! - Healthy: no failure since the last success, remote calls allowed
//! - Degraded: some consecutive failures, remote calls still allowed
//! - Failed: threshold reached, remote calls skipped until the open timeout elapses
//!
//! # State Transitions
//! ```text
//! any      → Healthy:  Success (counter and last failure cleared)
//! Healthy  → Degraded: Failure, counter below threshold
//! Degraded → Failed:   Failure, counter >= threshold
//! Failed   → Degraded: admission query after open timeout (single probe)
//! any      → Healthy:  manual reset
//! ```
//!
//! # Design Decisions
//! - Single global breaker for the one upstream service
//! - `ServiceHealth` is a plain value type; the time source is passed in so
//!   transitions are testable without sleeping
//! - `CircuitBreaker` wraps it in one mutex so each read-decide-mutate step
//!   sees a consistent snapshot
//! - Degraded is informational only: it admits traffic exactly like Healthy

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::config::CircuitBreakerConfig;
use crate::observability::metrics;

/// Breaker state as reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Healthy,
    Degraded,
    Failed,
}

impl HealthState {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthState::Healthy => "healthy",
            HealthState::Degraded => "degraded",
            HealthState::Failed => "failed",
        }
    }
}

impl std::fmt::Display for HealthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Thresholds driving the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakerPolicy {
    /// Consecutive failures that open the breaker.
    pub failure_threshold: u32,
    /// Time the breaker stays open before admitting a probe.
    pub open_timeout: Duration,
}

impl Default for BreakerPolicy {
    fn default() -> Self {
        Self {
            failure_threshold: 3,
            open_timeout: Duration::from_secs(300),
        }
    }
}

impl From<&CircuitBreakerConfig> for BreakerPolicy {
    fn from(config: &CircuitBreakerConfig) -> Self {
        Self {
            failure_threshold: config.failure_threshold.max(1),
            open_timeout: Duration::from_secs(config.open_timeout_secs),
        }
    }
}

/// Inputs to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakerEvent {
    /// A remote call returned a usable result.
    Success,
    /// A remote call failed (transport, timeout, status or body).
    Failure,
    /// The open timeout elapsed and a caller asked for admission.
    ProbeWindowElapsed,
    /// Operator override.
    ManualReset,
}

/// Outcome of asking the breaker whether the remote may be called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Healthy or Degraded: call the remote.
    Attempt,
    /// The open timeout elapsed; this call is the recovery probe.
    Probe,
    /// Failed: skip the remote.
    Reject {
        consecutive_failures: u32,
        retry_after: Duration,
    },
}

impl Admission {
    pub fn permits_remote(&self) -> bool {
        !matches!(self, Admission::Reject { .. })
    }
}

/// Mutable breaker state, owned by one `CircuitBreaker`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceHealth {
    state: HealthState,
    consecutive_failures: u32,
    last_failure_at: Option<Instant>,
}

impl Default for ServiceHealth {
    fn default() -> Self {
        Self {
            state: HealthState::Healthy,
            consecutive_failures: 0,
            last_failure_at: None,
        }
    }
}

impl ServiceHealth {
    pub fn state(&self) -> HealthState {
        self.state
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    pub fn last_failure_at(&self) -> Option<Instant> {
        self.last_failure_at
    }

    /// Apply one event and return the state after it.
    pub fn apply(&mut self, event: BreakerEvent, policy: &BreakerPolicy, now: Instant) -> HealthState {
        match event {
            BreakerEvent::Success | BreakerEvent::ManualReset => {
                *self = Self::default();
            }
            BreakerEvent::Failure => {
                self.consecutive_failures = self.consecutive_failures.saturating_add(1);
                self.last_failure_at = Some(now);
                self.state = if self.consecutive_failures >= policy.failure_threshold {
                    HealthState::Failed
                } else {
                    HealthState::Degraded
                };
            }
            BreakerEvent::ProbeWindowElapsed => {
                if self.state == HealthState::Failed {
                    self.state = HealthState::Degraded;
                }
            }
        }
        self.state
    }

    /// Decide whether the remote may be called at `now`.
    ///
    /// In `Failed`, an elapsed open timeout fires `ProbeWindowElapsed` and the
    /// caller becomes the probe. Counters are left untouched, so a failed probe
    /// reopens the breaker immediately.
    pub fn admit(&mut self, policy: &BreakerPolicy, now: Instant) -> Admission {
        match self.state {
            HealthState::Healthy | HealthState::Degraded => Admission::Attempt,
            HealthState::Failed => {
                let elapsed = self.elapsed_since_failure(now);
                if elapsed > policy.open_timeout {
                    self.apply(BreakerEvent::ProbeWindowElapsed, policy, now);
                    Admission::Probe
                } else {
                    Admission::Reject {
                        consecutive_failures: self.consecutive_failures,
                        retry_after: policy.open_timeout.saturating_sub(elapsed),
                    }
                }
            }
        }
    }

    fn elapsed_since_failure(&self, now: Instant) -> Duration {
        match self.last_failure_at {
            Some(at) => now.saturating_duration_since(at),
            // Failed without a timestamp cannot happen through `apply`; treat as expired.
            None => Duration::MAX,
        }
    }
}

/// Read-only view of the breaker for status reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakerSnapshot {
    pub state: HealthState,
    pub consecutive_failures: u32,
    pub failure_threshold: u32,
    pub open_timeout_secs: u64,
    /// Seconds since the last recorded failure, if any.
    pub last_failure_secs_ago: Option<f64>,
    /// Seconds until a probe is admitted; only set while Failed.
    pub retry_after_secs: Option<f64>,
}

/// Thread-safe circuit breaker.
#[derive(Debug)]
pub struct CircuitBreaker {
    policy: BreakerPolicy,
    health: Mutex<ServiceHealth>,
}

impl CircuitBreaker {
    pub fn new(policy: BreakerPolicy) -> Self {
        metrics::record_breaker_state(HealthState::Healthy);
        Self {
            policy,
            health: Mutex::new(ServiceHealth::default()),
        }
    }

    pub fn policy(&self) -> &BreakerPolicy {
        &self.policy
    }

    /// Whether the next request should go to the remote service.
    pub fn should_attempt_remote(&self) -> bool {
        self.admit().permits_remote()
    }

    pub fn admit(&self) -> Admission {
        self.admit_at(Instant::now())
    }

    pub fn admit_at(&self, now: Instant) -> Admission {
        let mut health = self.lock();
        let admission = health.admit(&self.policy, now);
        if admission == Admission::Probe {
            tracing::info!(
                consecutive_failures = health.consecutive_failures(),
                "Circuit breaker open timeout elapsed, admitting probe request"
            );
            metrics::record_breaker_state(health.state());
        }
        admission
    }

    pub fn record_success(&self) -> HealthState {
        self.transition(BreakerEvent::Success, Instant::now())
    }

    pub fn record_failure(&self) -> HealthState {
        self.record_failure_at(Instant::now())
    }

    pub fn record_failure_at(&self, now: Instant) -> HealthState {
        self.transition(BreakerEvent::Failure, now)
    }

    /// Force the breaker back to Healthy regardless of its current state.
    pub fn reset(&self) -> HealthState {
        let state = self.transition(BreakerEvent::ManualReset, Instant::now());
        tracing::info!("Circuit breaker manually reset");
        state
    }

    pub fn state(&self) -> HealthState {
        self.lock().state()
    }

    /// Copy of the current state. Never changes the breaker.
    pub fn health(&self) -> ServiceHealth {
        self.lock().clone()
    }

    pub fn snapshot(&self) -> BreakerSnapshot {
        self.snapshot_at(Instant::now())
    }

    pub fn snapshot_at(&self, now: Instant) -> BreakerSnapshot {
        let health = self.health();
        let since_failure = health
            .last_failure_at()
            .map(|at| now.saturating_duration_since(at));
        let retry_after = match (health.state(), since_failure) {
            (HealthState::Failed, Some(elapsed)) => Some(self.policy.open_timeout.saturating_sub(elapsed)),
            _ => None,
        };
        BreakerSnapshot {
            state: health.state(),
            consecutive_failures: health.consecutive_failures(),
            failure_threshold: self.policy.failure_threshold,
            open_timeout_secs: self.policy.open_timeout.as_secs(),
            last_failure_secs_ago: since_failure.map(|d| d.as_secs_f64()),
            retry_after_secs: retry_after.map(|d| d.as_secs_f64()),
        }
    }

    fn transition(&self, event: BreakerEvent, now: Instant) -> HealthState {
        let mut health = self.lock();
        let before = health.state();
        let after = health.apply(event, &self.policy, now);

        if before != after {
            match after {
                HealthState::Failed => tracing::warn!(
                    consecutive_failures = health.consecutive_failures(),
                    open_timeout_secs = self.policy.open_timeout.as_secs(),
                    "Circuit breaker opened, routing requests to fallback"
                ),
                HealthState::Degraded => tracing::warn!(
                    from = %before,
                    consecutive_failures = health.consecutive_failures(),
                    "Inference service degraded"
                ),
                HealthState::Healthy => tracing::info!(from = %before, "Inference service recovered"),
            }
            metrics::record_breaker_state(after);
        }
        after
    }

    fn lock(&self) -> MutexGuard<'_, ServiceHealth> {
        // Every mutation leaves ServiceHealth consistent, so a poisoned lock is still usable.
        self.health.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for CircuitBreaker {
    fn default() -> Self {
        Self::new(BreakerPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(threshold: u32, open_secs: u64) -> BreakerPolicy {
        BreakerPolicy {
            failure_threshold: threshold,
            open_timeout: Duration::from_secs(open_secs),
        }
    }

    #[test]
    fn test_starts_healthy() {
        let breaker = CircuitBreaker::default();
        assert_eq!(breaker.state(), HealthState::Healthy);
        assert_eq!(breaker.health().consecutive_failures(), 0);
        assert!(breaker.health().last_failure_at().is_none());
        assert!(breaker.should_attempt_remote());
    }

    #[test]
    fn test_opens_after_threshold() {
        let breaker = CircuitBreaker::new(policy(3, 300));

        assert_eq!(breaker.record_failure(), HealthState::Degraded);
        assert!(breaker.should_attempt_remote(), "degraded still admits traffic");
        assert_eq!(breaker.record_failure(), HealthState::Degraded);
        assert!(breaker.should_attempt_remote());
        assert_eq!(breaker.record_failure(), HealthState::Failed);
        assert!(!breaker.should_attempt_remote());
        assert!(!breaker.should_attempt_remote(), "rejection does not consume the window");
    }

    #[test]
    fn test_threshold_of_one_fails_immediately() {
        let breaker = CircuitBreaker::new(policy(1, 300));
        assert_eq!(breaker.record_failure(), HealthState::Failed);
    }

    #[test]
    fn test_success_resets_from_any_state() {
        let breaker = CircuitBreaker::new(policy(2, 300));
        breaker.record_failure();
        breaker.record_failure();
        assert_eq!(breaker.state(), HealthState::Failed);

        assert_eq!(breaker.record_success(), HealthState::Healthy);
        let health = breaker.health();
        assert_eq!(health.consecutive_failures(), 0);
        assert!(health.last_failure_at().is_none());

        breaker.record_failure();
        assert_eq!(breaker.record_success(), HealthState::Healthy);
    }

    #[test]
    fn test_reject_reports_failures_and_retry_after() {
        let breaker = CircuitBreaker::new(policy(3, 300));
        let t0 = Instant::now();
        for _ in 0..3 {
            breaker.record_failure_at(t0);
        }

        match breaker.admit_at(t0 + Duration::from_secs(100)) {
            Admission::Reject {
                consecutive_failures,
                retry_after,
            } => {
                assert_eq!(consecutive_failures, 3);
                assert_eq!(retry_after, Duration::from_secs(200));
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_probe_after_open_timeout_downgrades_to_degraded() {
        let breaker = CircuitBreaker::new(policy(3, 300));
        let t0 = Instant::now();
        for _ in 0..3 {
            breaker.record_failure_at(t0);
        }
        assert_eq!(breaker.state(), HealthState::Failed);

        // Exactly at the timeout the breaker is still open.
        assert!(!breaker.admit_at(t0 + Duration::from_secs(300)).permits_remote());

        let admission = breaker.admit_at(t0 + Duration::from_secs(301));
        assert_eq!(admission, Admission::Probe);
        assert_eq!(breaker.state(), HealthState::Degraded);
        assert_eq!(breaker.health().consecutive_failures(), 3, "probe is not a reset");
    }

    #[test]
    fn test_failed_probe_reopens() {
        let breaker = CircuitBreaker::new(policy(3, 300));
        let t0 = Instant::now();
        for _ in 0..3 {
            breaker.record_failure_at(t0);
        }
        let t1 = t0 + Duration::from_secs(301);
        assert_eq!(breaker.admit_at(t1), Admission::Probe);

        assert_eq!(breaker.record_failure_at(t1), HealthState::Failed);
        assert_eq!(breaker.health().consecutive_failures(), 4);
        assert!(!breaker.admit_at(t1 + Duration::from_secs(10)).permits_remote());
    }

    #[test]
    fn test_manual_reset_from_failed() {
        let breaker = CircuitBreaker::new(policy(3, 300));
        for _ in 0..3 {
            breaker.record_failure();
        }
        assert_eq!(breaker.state(), HealthState::Failed);

        assert_eq!(breaker.reset(), HealthState::Healthy);
        assert!(breaker.should_attempt_remote());
        assert_eq!(breaker.health().consecutive_failures(), 0);
    }

    #[test]
    fn test_snapshot_does_not_mutate() {
        let breaker = CircuitBreaker::new(policy(2, 300));
        let t0 = Instant::now();
        breaker.record_failure_at(t0);
        breaker.record_failure_at(t0);

        let later = t0 + Duration::from_secs(400);
        let snapshot = breaker.snapshot_at(later);
        assert_eq!(snapshot.state, HealthState::Failed);
        assert_eq!(snapshot.consecutive_failures, 2);
        assert_eq!(snapshot.retry_after_secs, Some(0.0));
        assert_eq!(snapshot.last_failure_secs_ago, Some(400.0));

        // Only an admission query performs the probe edge.
        assert_eq!(breaker.state(), HealthState::Failed);
    }

    #[test]
    fn test_value_type_transitions() {
        let policy = policy(3, 300);
        let now = Instant::now();
        let mut health = ServiceHealth::default();

        assert_eq!(health.apply(BreakerEvent::ProbeWindowElapsed, &policy, now), HealthState::Healthy);
        assert_eq!(health.apply(BreakerEvent::Failure, &policy, now), HealthState::Degraded);
        assert_eq!(health.last_failure_at(), Some(now));
        assert_eq!(health.apply(BreakerEvent::ManualReset, &policy, now), HealthState::Healthy);
        assert_eq!(health, ServiceHealth::default());
    }

    #[test]
    fn test_concurrent_failures_are_all_counted() {
        use std::sync::Arc;

        let breaker = Arc::new(CircuitBreaker::new(policy(1_000, 300)));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let breaker = breaker.clone();
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        breaker.record_failure();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(breaker.health().consecutive_failures(), 400);
    }
}
