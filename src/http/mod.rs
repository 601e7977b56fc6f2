//! HTTP gateway subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, trace, timeout)
//!     → sentiment.rs (parse body, call FailSafeClient)
//!     → admin (bearer-protected breaker controls)
//!     → response.rs (input errors as 422 JSON)
//!     → Send to client
//! ```

pub mod response;
pub mod sentiment;
pub mod server;

pub use server::{AppState, HttpServer};
