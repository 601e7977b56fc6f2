//! Error definitions for the inference client.

use thiserror::Error;

use crate::resilience::DeadlineExceeded;

/// Caller misuse. The only errors `FailSafeClient` prediction calls return.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("text must not be empty")]
    EmptyText,

    #[error("text has {len} characters, limit is {max}")]
    TextTooLong { len: usize, max: usize },

    #[error("batch must contain at least one text")]
    EmptyBatch,

    #[error("batch has {len} texts, limit is {max}")]
    BatchTooLarge { len: usize, max: usize },

    #[error("text at index {index}: {reason}")]
    InvalidItem { index: usize, reason: String },
}

/// Why a remote call did not produce a result. Each variant is one breaker
/// `Failure`; the distinction only matters for logs and metrics.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("request timed out: {0}")]
    Timeout(#[from] DeadlineExceeded),

    #[error("connection failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl RemoteError {
    /// Short label used as a metrics dimension.
    pub fn kind(&self) -> &'static str {
        match self {
            RemoteError::Timeout(_) => "timeout",
            RemoteError::Transport(_) => "transport",
            RemoteError::Status(_) => "status",
            RemoteError::Malformed(_) => "malformed",
        }
    }
}

/// Client construction errors.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("invalid inference service URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported URL scheme '{0}', expected http or https")]
    UnsupportedScheme(String),

    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_error_display() {
        let err = InputError::BatchTooLarge { len: 150, max: 100 };
        assert_eq!(err.to_string(), "batch has 150 texts, limit is 100");

        let err = InputError::InvalidItem {
            index: 2,
            reason: InputError::EmptyText.to_string(),
        };
        assert_eq!(err.to_string(), "text at index 2: text must not be empty");

        let err = RemoteError::from(DeadlineExceeded(Duration::from_millis(250)));
        assert_eq!(err.to_string(), "request timed out: deadline of 250ms exceeded");
        assert_eq!(err.kind(), "timeout");

        let err = RemoteError::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.to_string(), "unexpected status 503 Service Unavailable");
    }
}
