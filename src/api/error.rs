//! # API Error Taxonomy
//!
//! One classification used by every remote operation. HTTP statuses map onto
//! fixed categories; timeouts and unreachable hosts are distinct conditions;
//! local validation failures short-circuit before the network layer. Retry
//! logic keys off [`ApiError::is_retryable`].

use thiserror::Error;

/// Failure of a remote sync operation
#[derive(Debug, Error)]
pub enum ApiError {
    /// Local validation failed; no request was sent
    #[error("{0}")]
    Validation(String),

    /// The request was cancelled by the client-side timeout
    #[error("network timeout")]
    Timeout,

    /// The host could not be reached at all (DNS, refused connection, ...)
    #[error("network unreachable: {0}")]
    Network(String),

    /// HTTP 401
    #[error("authentication required")]
    AuthRequired,

    /// HTTP 403
    #[error("forbidden")]
    Forbidden,

    /// HTTP 404
    #[error("not found")]
    NotFound,

    /// Other HTTP 4xx
    #[error("malformed request (HTTP {status}): {message}")]
    BadRequest { status: u16, message: String },

    /// HTTP 5xx
    #[error("server error (HTTP {status}): {message}")]
    Server { status: u16, message: String },
}

impl ApiError {
    /// Map a non-2xx status and the server's own message into a category
    pub fn classify(status: u16, message: String) -> Self {
        match status {
            401 => ApiError::AuthRequired,
            403 => ApiError::Forbidden,
            404 => ApiError::NotFound,
            400..=499 => ApiError::BadRequest { status, message },
            _ => ApiError::Server { status, message },
        }
    }

    /// Transient failures worth an automatic retry (list/read operations only)
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApiError::Timeout | ApiError::Network(_) | ApiError::Server { .. }
        )
    }

    /// User-facing display string for the failure
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Validation(msg) => msg.clone(),
            ApiError::Timeout => {
                "The server is taking too long to respond. Check your network and try again."
                    .to_string()
            }
            ApiError::Network(_) => "Check your network connection.".to_string(),
            ApiError::AuthRequired => "Please log in first.".to_string(),
            ApiError::Forbidden => "You don't have access to this.".to_string(),
            ApiError::NotFound => "The requested data could not be found.".to_string(),
            ApiError::BadRequest { .. } => {
                "There is a problem with the request. Check your input.".to_string()
            }
            ApiError::Server { .. } => {
                "The server had a temporary problem. Please try again shortly.".to_string()
            }
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Network(e.to_string())
        }
    }
}
