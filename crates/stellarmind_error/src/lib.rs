//! Error types for the StellarMind assistant core.
//!
//! This crate provides the foundation error types used throughout the StellarMind workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! Quota exhaustion is deliberately absent: running out of uses is a normal
//! outcome reported by the quota tracker, not an error.
//!
//! # Examples
//!
//! ```
//! use stellarmind_error::{RequestError, RequestErrorKind, StellarmindResult};
//!
//! fn fetch_data() -> StellarmindResult<String> {
//!     Err(RequestError::new(RequestErrorKind::Network("Connection refused".into())))?
//! }
//!
//! assert!(fetch_data().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod json;
mod request;
mod storage;
mod upstream;

pub use config::{ConfigError, ConfigErrorKind};
pub use error::{StellarmindError, StellarmindErrorKind, StellarmindResult};
pub use json::{JsonError, JsonErrorKind};
pub use request::{RequestError, RequestErrorKind, RetryableError};
pub use storage::{StorageError, StorageErrorKind};
pub use upstream::{UpstreamError, UpstreamErrorKind};
