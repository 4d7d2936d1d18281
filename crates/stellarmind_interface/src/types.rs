//! Values exchanged with a document store.

use crate::DocumentPath;
use serde::{Deserialize, Serialize};

/// A document and where it lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct StoredDocument {
    /// Full document path
    path: DocumentPath,
    /// Document body; always a JSON object
    data: serde_json::Value,
}

impl StoredDocument {
    /// Pair a path with its body.
    pub fn new(path: DocumentPath, data: serde_json::Value) -> Self {
        Self { path, data }
    }

    /// Document id (last path segment).
    pub fn id(&self) -> &str {
        self.path.id()
    }

    /// Field `name` of the body, if present.
    pub fn field(&self, name: &str) -> Option<&serde_json::Value> {
        self.data.get(name)
    }
}

/// A change observed on a subscribed collection.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentChange {
    /// A document was created
    Added(StoredDocument),
    /// An existing document was overwritten or merged into
    Modified(StoredDocument),
}

impl DocumentChange {
    /// The document after the change.
    pub fn document(&self) -> &StoredDocument {
        match self {
            DocumentChange::Added(doc) | DocumentChange::Modified(doc) => doc,
        }
    }
}
