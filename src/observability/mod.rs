//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Breaker transitions, remote failures, fallback decisions
//!     → logging.rs (structured tracing events, pretty or JSON)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → stdout log collection
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Metrics go through the `metrics` facade; without an installed recorder
//!   every call is a no-op, so library users and tests pay nothing
//! - Request IDs come from the HTTP layer and appear on trace spans

pub mod logging;
pub mod metrics;
