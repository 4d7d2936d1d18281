//! Document store error types.

/// Document store failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum StorageErrorKind {
    /// Path is empty or malformed
    #[display("Invalid document path: {}", _0)]
    InvalidPath(String),
    /// Document body must be a JSON object
    #[display("Document at {} is not a JSON object", _0)]
    NotAnObject(String),
    /// Backend failure
    #[display("Storage backend error: {}", _0)]
    Backend(String),
}

/// Document store error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    kind: StorageErrorKind,
    line: u32,
    file: &'static str,
}

impl StorageError {
    /// Create a new storage error with caller location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StorageErrorKind {
        &self.kind
    }
}
