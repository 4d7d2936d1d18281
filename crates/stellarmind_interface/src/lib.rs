//! Collaborator traits for the StellarMind assistant core.
//!
//! The session layer talks to identity and persistence only through the
//! traits defined here, so any backend can be plugged in.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod path;
mod traits;
mod types;

pub use path::{CollectionPath, DocumentPath};
pub use traits::{DocumentChangeStream, DocumentStore, IdentityProvider};
pub use types::{DocumentChange, StoredDocument};
