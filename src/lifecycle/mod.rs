//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Config (already validated) → Metrics → Client → Bind → Serve
//!
//! Shutdown (shutdown.rs):
//!     Trigger → Broadcast to subscribers → Server drains → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last, after the client is ready

pub mod shutdown;
pub mod signals;
pub mod startup;
