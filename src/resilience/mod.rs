//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request for a prediction:
//!     → circuit_breaker.rs (admission: attempt, probe or reject)
//!     → timeouts.rs (remote call bounded by a deadline)
//!     → circuit_breaker.rs (record Success or Failure)
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every external call has a deadline
//! - No retries inside a single prediction; a failure goes straight to fallback
//! - Circuit breaker prevents piling requests onto a dead inference service

pub mod circuit_breaker;
pub mod timeouts;

pub use circuit_breaker::{Admission, BreakerPolicy, BreakerSnapshot, CircuitBreaker, HealthState, ServiceHealth};
pub use timeouts::{with_deadline, DeadlineExceeded};
