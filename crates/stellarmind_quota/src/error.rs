//! Error types for quota configuration.

use std::fmt;

/// Error kinds for quota operations.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QuotaErrorKind {
    /// Unknown tier name.
    InvalidTier(String),
    /// Unknown feature name.
    InvalidFeature(String),
}

impl fmt::Display for QuotaErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuotaErrorKind::InvalidTier(name) => write!(f, "Invalid tier: {}", name),
            QuotaErrorKind::InvalidFeature(name) => write!(f, "Invalid feature: {}", name),
        }
    }
}

/// Quota error with location tracking.
#[derive(Debug, Clone)]
pub struct QuotaError {
    kind: QuotaErrorKind,
    line: u32,
    file: &'static str,
}

impl QuotaError {
    /// Create a new quota error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: QuotaErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &QuotaErrorKind {
        &self.kind
    }
}

impl fmt::Display for QuotaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Quota Error: {} at line {} in {}",
            self.kind, self.line, self.file
        )
    }
}

impl std::error::Error for QuotaError {}

impl<T> From<T> for QuotaError
where
    T: Into<QuotaErrorKind>,
{
    #[track_caller]
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}
