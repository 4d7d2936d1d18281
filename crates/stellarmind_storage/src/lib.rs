//! Local implementations of the StellarMind collaborator traits.
//!
//! [`InMemoryDocumentStore`] keeps documents in process memory and publishes
//! collection changes to subscribers. [`AnonymousIdentityProvider`] hands out a
//! random guest identity, and [`StaticIdentityProvider`] a fixed one.
//!
//! # Example
//!
//! ```rust
//! use stellarmind_interface::{CollectionPath, DocumentStore};
//! use stellarmind_storage::InMemoryDocumentStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = InMemoryDocumentStore::new();
//! let messages = CollectionPath::new("artifacts/app/users/uid/messages")?;
//!
//! let path = store.add(&messages, serde_json::json!({"text": "hi"})).await?;
//! let stored = store.get(&path).await?;
//! assert_eq!(stored, Some(serde_json::json!({"text": "hi"})));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod identity;
mod memory;

pub use identity::{AnonymousIdentityProvider, StaticIdentityProvider};
pub use memory::InMemoryDocumentStore;
