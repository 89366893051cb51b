//! HTTP client error types.

use thiserror::Error;

/// Errors that can occur when talking to the storefront backends.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP error response.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Request timeout.
    #[error("Request timed out")]
    Timeout,

    /// The server answered but reported a failure in the body.
    #[error("{0}")]
    Application(String),
}

impl FetchError {
    /// Whether a retry could plausibly succeed: network failures, timeouts
    /// and 5xx responses. Client errors are never retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Network(_) | FetchError::Timeout => true,
            FetchError::Http { status, .. } => (500..600).contains(status),
            _ => false,
        }
    }

    /// HTTP status, for HTTP errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Parse(e.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_builder() {
            FetchError::InvalidUrl(e.to_string())
        } else {
            FetchError::Network(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(FetchError::Network("refused".into()).is_retryable());
        assert!(FetchError::Timeout.is_retryable());
        assert!(FetchError::Http { status: 503, message: String::new() }.is_retryable());
        assert!(!FetchError::Http { status: 404, message: String::new() }.is_retryable());
        assert!(!FetchError::Parse("eof".into()).is_retryable());
        assert!(!FetchError::Application("out of stock".into()).is_retryable());
    }

    #[test]
    fn test_http_error_displays_message() {
        let err = FetchError::Http {
            status: 400,
            message: "Book is out of stock".into(),
        };
        assert_eq!(err.to_string(), "Book is out of stock");
        assert_eq!(err.status(), Some(400));
    }
}
