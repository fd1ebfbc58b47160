//! Upstream error types.

use thiserror::Error;

/// Result type for upstream operations.
pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// Default back-off when a 429 carries no usable Retry-After header.
const DEFAULT_RATE_LIMIT_BACKOFF_MS: u64 = 1000;

/// Errors that can occur while talking to third-party services.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Upstream returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limited, retry after {0}ms")]
    RateLimited(u64),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("yt-dlp not found in PATH")]
    ToolNotFound,

    #[error("yt-dlp failed: {0}")]
    ToolFailed(String),

    #[error("Operation timed out after {0} seconds")]
    Timeout(u64),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl UpstreamError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Map a non-success HTTP status to an error.
    pub fn from_http_status(status: u16, body: impl Into<String>, retry_after_ms: Option<u64>) -> Self {
        match status {
            404 => Self::NotFound(body.into()),
            429 => Self::RateLimited(retry_after_ms.unwrap_or(DEFAULT_RATE_LIMIT_BACKOFF_MS)),
            _ => Self::Status {
                status,
                body: body.into(),
            },
        }
    }

    /// Check if error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            UpstreamError::RateLimited(_) => true,
            UpstreamError::Status { status, .. } => *status >= 500,
            UpstreamError::Network(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            _ => false,
        }
    }

    /// Server-requested back-off, if any.
    pub fn retry_after_ms(&self) -> Option<u64> {
        match self {
            UpstreamError::RateLimited(ms) => Some(*ms),
            _ => None,
        }
    }

    /// HTTP status this error corresponds to, if it came from an HTTP response.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            UpstreamError::Status { status, .. } => Some(*status),
            UpstreamError::NotFound(_) => Some(404),
            UpstreamError::RateLimited(_) => Some(429),
            UpstreamError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_http_status_404() {
        let err = UpstreamError::from_http_status(404, "missing", None);
        assert!(matches!(err, UpstreamError::NotFound(_)));
        assert!(!err.is_retryable());
        assert_eq!(err.http_status(), Some(404));
    }

    #[test]
    fn test_from_http_status_429() {
        let err = UpstreamError::from_http_status(429, "slow down", Some(2500));
        assert!(matches!(err, UpstreamError::RateLimited(2500)));
        assert!(err.is_retryable());
        assert_eq!(err.retry_after_ms(), Some(2500));

        let err = UpstreamError::from_http_status(429, "slow down", None);
        assert_eq!(err.retry_after_ms(), Some(DEFAULT_RATE_LIMIT_BACKOFF_MS));
    }

    #[test]
    fn test_from_http_status_5xx_is_retryable() {
        let err = UpstreamError::from_http_status(503, "unavailable", None);
        assert!(matches!(err, UpstreamError::Status { status: 503, .. }));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_from_http_status_4xx_is_not_retryable() {
        let err = UpstreamError::from_http_status(403, "forbidden", None);
        assert!(!err.is_retryable());
        assert_eq!(err.http_status(), Some(403));
    }

    #[test]
    fn test_tool_errors_have_no_status() {
        assert_eq!(UpstreamError::ToolNotFound.http_status(), None);
        assert!(!UpstreamError::ToolFailed("boom".into()).is_retryable());
    }
}
