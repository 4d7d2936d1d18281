//! Outbound request errors and retry classification.

/// Outbound request failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum RequestErrorKind {
    /// The target answered 404; never retried
    #[display("Resource not found at {}. Please check the URL and deployment.", target)]
    NotFound {
        /// Request target (with credentials redacted)
        target: String,
    },
    /// Non-success, non-404 HTTP status
    #[display("API error: {} {} - {}", status, status_text, message)]
    Status {
        /// HTTP status code
        status: u16,
        /// Canonical reason phrase for the status
        status_text: String,
        /// `error.message` from the response body, or "Unknown error"
        message: String,
    },
    /// Connection failure, timeout or other transport-level error
    #[display("Network error: {}", _0)]
    Network(String),
    /// The caller abandoned the request
    #[display("Request cancelled")]
    Cancelled,
    /// The request could not be constructed
    #[display("Invalid request: {}", _0)]
    InvalidRequest(String),
}

impl RequestErrorKind {
    /// Check if this error type should be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            RequestErrorKind::Status { .. } | RequestErrorKind::Network(_)
        )
    }

    /// HTTP status observed for this failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestErrorKind::NotFound { .. } => Some(404),
            RequestErrorKind::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Request error with source location tracking.
///
/// # Examples
///
/// ```
/// use stellarmind_error::{RequestError, RequestErrorKind, RetryableError};
///
/// let err = RequestError::new(RequestErrorKind::Status {
///     status: 503,
///     status_text: "Service Unavailable".to_string(),
///     message: "Model is overloaded".to_string(),
/// });
/// assert!(err.is_retryable());
/// assert!(format!("{}", err).contains("503 Service Unavailable"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Request Error: {} at line {} in {}", kind, line, file)]
pub struct RequestError {
    kind: RequestErrorKind,
    line: u32,
    file: &'static str,
}

impl RequestError {
    /// Create a new RequestError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RequestErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &RequestErrorKind {
        &self.kind
    }
}

/// Trait for errors that support retry logic.
///
/// Transient failures (5xx, 429, connection resets, timeouts) return true.
/// Terminal failures such as 404 or cancellation return false.
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    fn is_retryable(&self) -> bool;
}

impl RetryableError for RequestError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}
