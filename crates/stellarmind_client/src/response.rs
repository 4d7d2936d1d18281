//! Response of a single transport attempt.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use stellarmind_error::JsonError;

const UNKNOWN_ERROR: &str = "Unknown error";

/// Status, headers of interest and body of one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    status: u16,
    status_text: String,
    content_type: Option<String>,
    body: Vec<u8>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorBody>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl TransportResponse {
    /// Build a response from its parts.
    pub fn new(
        status: u16,
        status_text: impl Into<String>,
        content_type: Option<String>,
        body: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            content_type,
            body: body.into(),
        }
    }

    /// HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Reason phrase for the status.
    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    /// `Content-Type` header, if any.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Raw body.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// True when the content type names JSON.
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.to_ascii_lowercase().contains("application/json"))
    }

    /// Deserialize the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, JsonError> {
        serde_json::from_slice(&self.body).map_err(JsonError::decode)
    }

    /// `error.message` from a JSON error body, or "Unknown error".
    ///
    /// Never fails: unparseable bodies produce the placeholder.
    pub fn error_message(&self) -> String {
        serde_json::from_slice::<ErrorEnvelope>(&self.body)
            .ok()
            .and_then(|envelope| envelope.error)
            .and_then(|error| error.message)
            .unwrap_or_else(|| UNKNOWN_ERROR.to_string())
    }
}
