//! Identity and persistence traits.

use crate::{CollectionPath, DocumentChange, DocumentPath, StoredDocument};
use async_trait::async_trait;
use futures_util::stream::Stream;
use std::pin::Pin;
use stellarmind_core::SessionIdentity;
use stellarmind_error::StellarmindResult;

/// Stream of changes to one collection.
pub type DocumentChangeStream = Pin<Box<dyn Stream<Item = DocumentChange> + Send>>;

/// Hierarchical JSON document store.
///
/// Document bodies are JSON objects. Collections keep insertion order.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Append `data` to `collection` under a generated id; returns the new path.
    async fn add(
        &self,
        collection: &CollectionPath,
        data: serde_json::Value,
    ) -> StellarmindResult<DocumentPath>;

    /// Read one document.
    async fn get(&self, path: &DocumentPath) -> StellarmindResult<Option<serde_json::Value>>;

    /// Write one document.
    ///
    /// With `merge`, top-level fields of `data` replace those of the existing
    /// document and other fields are kept; without it the document is replaced.
    async fn set(
        &self,
        path: &DocumentPath,
        data: serde_json::Value,
        merge: bool,
    ) -> StellarmindResult<()>;

    /// All documents of `collection` in insertion order.
    async fn list(&self, collection: &CollectionPath) -> StellarmindResult<Vec<StoredDocument>>;

    /// Changes to `collection` from now on.
    fn subscribe(&self, collection: &CollectionPath) -> DocumentChangeStream;
}

/// Source of the identity owning a session.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Identity of the current user, signing in anonymously if needed.
    async fn current_identity(&self) -> StellarmindResult<SessionIdentity>;
}
