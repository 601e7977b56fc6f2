//! Timeout enforcement.
//!
//! Every call to the inference service runs under a deadline. Expiry is
//! reported as its own error so callers can log it distinctly, but the
//! breaker treats it like any other failure.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

/// The wrapped operation did not finish in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("deadline of {}ms exceeded", .0.as_millis())]
pub struct DeadlineExceeded(pub Duration);

/// Run `fut` to completion or until `deadline` passes, whichever is first.
/// The future is dropped (cancelled) on expiry.
pub async fn with_deadline<F>(deadline: Duration, fut: F) -> Result<F::Output, DeadlineExceeded>
where
    F: Future,
{
    tokio::time::timeout(deadline, fut)
        .await
        .map_err(|_| DeadlineExceeded(deadline))
}
