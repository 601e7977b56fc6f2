//! Fail-safe sentiment inference: a circuit-breaker-guarded client for a
//! remote ML service with an always-available local fallback scorer.

pub mod admin;
pub mod config;
pub mod fallback;
pub mod health;
pub mod http;
pub mod inference;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod scoring;

pub use config::schema::ServiceConfig;
pub use http::HttpServer;
pub use inference::{BatchResult, FailSafeClient, PredictionResult, Provenance, Sentiment};
pub use lifecycle::shutdown::Shutdown;
pub use resilience::{CircuitBreaker, HealthState};
