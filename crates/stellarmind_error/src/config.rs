//! Configuration loading errors.

/// Stage of configuration loading that failed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ConfigErrorKind {
    /// An explicitly requested file could not be read
    #[display("Failed to read configuration from {}: {}", path, reason)]
    Read {
        /// File that was requested
        path: String,
        /// Loader message
        reason: String,
    },
    /// Sources could not be merged
    #[display("Failed to build configuration: {}", _0)]
    Build(String),
    /// Merged sources did not match the expected shape
    #[display("Failed to parse configuration: {}", _0)]
    Parse(String),
}

/// Configuration error with location tracking.
///
/// # Examples
///
/// ```
/// use stellarmind_error::{ConfigError, ConfigErrorKind};
///
/// let err = ConfigError::new(ConfigErrorKind::Parse("invalid type: string".into()));
/// assert!(err.kind().to_string().starts_with("Failed to parse configuration"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", kind, line, file)]
pub struct ConfigError {
    kind: ConfigErrorKind,
    line: u32,
    file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError with caller location tracking.
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ConfigErrorKind {
        &self.kind
    }
}
