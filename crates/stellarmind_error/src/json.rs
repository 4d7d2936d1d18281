//! JSON conversion errors.

/// Direction of the failed conversion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum JsonErrorKind {
    /// A value could not be serialized
    #[display("Failed to encode JSON: {}", _0)]
    Encode(String),
    /// Bytes could not be deserialized into the target type
    #[display("Failed to decode JSON: {}", _0)]
    Decode(String),
}

impl JsonErrorKind {
    /// Underlying serde message without the direction prefix.
    pub fn reason(&self) -> &str {
        match self {
            Self::Encode(reason) | Self::Decode(reason) => reason,
        }
    }
}

/// JSON error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("JSON Error: {} at line {} in {}", kind, line, file)]
pub struct JsonError {
    kind: JsonErrorKind,
    line: u32,
    file: &'static str,
}

impl JsonError {
    /// Create a new JsonError with caller location tracking.
    #[track_caller]
    pub fn new(kind: JsonErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Wrap a serialization failure.
    #[track_caller]
    pub fn encode(err: impl std::fmt::Display) -> Self {
        Self::new(JsonErrorKind::Encode(err.to_string()))
    }

    /// Wrap a deserialization failure.
    #[track_caller]
    pub fn decode(err: impl std::fmt::Display) -> Self {
        Self::new(JsonErrorKind::Decode(err.to_string()))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &JsonErrorKind {
        &self.kind
    }
}
