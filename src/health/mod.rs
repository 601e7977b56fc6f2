//! Health checking of the inference service.
//!
//! # Design Decisions
//! - Probes are on demand (status calls), not periodic
//! - Probe results are reported only; breaker decisions come from real traffic

pub mod probe;

pub use probe::{HealthProbe, ProbeReport};
