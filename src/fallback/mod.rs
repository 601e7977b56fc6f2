//! Fallback subsystem.
//!
//! # Data Flow
//! ```text
//! remote unavailable (breaker open, timeout, error)
//!     → engine.rs (score locally, annotate provenance and reason)
//!         lexicon scorer when loaded
//!         minimal scorer when the lexicon is missing or errors
//!     → PredictionResult / BatchResult in the same shape as remote results
//! ```
//!
//! # Design Decisions
//! - Fallback never fails the request; unavailability is data, not an error
//! - Batch fallback scores sequentially and preserves input order

pub mod engine;

pub use engine::FallbackEngine;
