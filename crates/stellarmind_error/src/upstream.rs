//! Errors for upstream responses that arrived but could not be used.

/// Ways an upstream response can be malformed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum UpstreamErrorKind {
    /// The response was not JSON
    #[display(
        "Expected JSON from the AI service, but received {}. Raw response: {}...",
        content_type,
        snippet
    )]
    UnexpectedContentType {
        /// Content type header, or "no content type"
        content_type: String,
        /// First characters of the body
        snippet: String,
    },
    /// JSON body did not match the expected envelope
    #[display("Could not decode AI service response: {}", _0)]
    Decode(String),
    /// Image payload was present but not valid base64
    #[display("Image data could not be decoded: {}", _0)]
    InvalidImageData(String),
}

/// Upstream response error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Upstream Error: {} at line {} in {}", kind, line, file)]
pub struct UpstreamError {
    kind: UpstreamErrorKind,
    line: u32,
    file: &'static str,
}

impl UpstreamError {
    /// Create a new UpstreamError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: UpstreamErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &UpstreamErrorKind {
        &self.kind
    }
}
