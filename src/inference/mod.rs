//! Inference client subsystem.
//!
//! # Data Flow
//! ```text
//! caller (HTTP handler, CLI, library user)
//!     → client.rs     validate, consult breaker, pick a path
//!     → remote.rs     HTTP call to the inference service
//!     → fallback      local scoring when the remote is skipped or fails
//!     → types.rs      one result shape for both paths
//! ```

pub mod client;
pub mod error;
pub mod remote;
pub mod types;

pub use client::{ClientSettings, FailSafeClient, FallbackStatus, RemoteStatus, ServiceStatus};
pub use error::{InputError, RemoteError, SetupError};
pub use remote::InferenceService;
pub use types::{
    BatchResult, BatchSummary, PredictionResult, Probabilities, Provenance, Sentiment,
    SentimentDistribution,
};
