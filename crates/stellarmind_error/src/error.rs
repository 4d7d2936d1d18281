//! Top-level error wrapper types.

use crate::{ConfigError, JsonError, RequestError, RequestErrorKind, StorageError, UpstreamError};

/// Every failure the workspace can surface to a feature handler.
///
/// # Examples
///
/// ```
/// use stellarmind_error::{ConfigError, ConfigErrorKind, StellarmindError};
///
/// let err: StellarmindError = ConfigError::new(ConfigErrorKind::Build("no sources".into())).into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum StellarmindErrorKind {
    /// Outbound request failed (not found, transient, cancelled)
    #[from(RequestError)]
    Request(RequestError),
    /// Upstream answered, but not in a usable shape
    #[from(UpstreamError)]
    Upstream(UpstreamError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Document store error
    #[from(StorageError)]
    Storage(StorageError),
}

/// StellarMind error with kind discrimination.
///
/// # Examples
///
/// ```
/// use stellarmind_error::{ConfigError, ConfigErrorKind, StellarmindResult};
///
/// fn might_fail() -> StellarmindResult<()> {
///     Err(ConfigError::new(ConfigErrorKind::Parse("missing field `app_id`".into())))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("StellarMind Error: {}", _0)]
pub struct StellarmindError(Box<StellarmindErrorKind>);

impl StellarmindError {
    /// Create a new error from a kind.
    pub fn new(kind: StellarmindErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StellarmindErrorKind {
        &self.0
    }

    /// True when the caller abandoned the request.
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self.kind(),
            StellarmindErrorKind::Request(e) if *e.kind() == RequestErrorKind::Cancelled
        )
    }

    /// Message suitable for showing to the user, without location details.
    pub fn user_message(&self) -> String {
        match self.kind() {
            StellarmindErrorKind::Request(e) => e.kind().to_string(),
            StellarmindErrorKind::Upstream(e) => e.kind().to_string(),
            StellarmindErrorKind::Json(e) => e.kind().to_string(),
            StellarmindErrorKind::Config(e) => e.kind().to_string(),
            StellarmindErrorKind::Storage(e) => e.kind().to_string(),
        }
    }
}

// Generic From implementation for any type that converts to StellarmindErrorKind
impl<T> From<T> for StellarmindError
where
    T: Into<StellarmindErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for StellarMind operations.
pub type StellarmindResult<T> = std::result::Result<T, StellarmindError>;
