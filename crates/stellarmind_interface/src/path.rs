//! Slash-separated document store paths.
//!
//! Paths alternate collection and document segments, so a collection path has
//! an odd number of segments and a document path an even number.

use serde::{Deserialize, Serialize};
use stellarmind_error::{StellarmindResult, StorageError, StorageErrorKind};

fn segments(raw: &str) -> StellarmindResult<Vec<&str>> {
    let parts: Vec<&str> = raw.split('/').collect();
    if raw.is_empty() || parts.iter().any(|part| part.trim().is_empty()) {
        return Err(StorageError::new(StorageErrorKind::InvalidPath(raw.to_string())).into());
    }
    Ok(parts)
}

/// Path of a collection, e.g. `artifacts/app/users/uid/messages`.
///
/// # Examples
///
/// ```
/// use stellarmind_interface::CollectionPath;
///
/// let messages = CollectionPath::new("artifacts/app/users/uid/messages").unwrap();
/// let doc = messages.doc("m1").unwrap();
/// assert_eq!(doc.as_str(), "artifacts/app/users/uid/messages/m1");
/// assert_eq!(doc.parent(), messages);
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
#[serde(try_from = "String", into = "String")]
pub struct CollectionPath(String);

impl CollectionPath {
    /// Validate `raw` as a collection path.
    pub fn new(raw: impl Into<String>) -> StellarmindResult<Self> {
        let raw = raw.into();
        if segments(&raw)?.len() % 2 == 0 {
            return Err(StorageError::new(StorageErrorKind::InvalidPath(raw)).into());
        }
        Ok(Self(raw))
    }

    /// Document `id` inside this collection.
    pub fn doc(&self, id: &str) -> StellarmindResult<DocumentPath> {
        DocumentPath::new(format!("{}/{}", self.0, id))
    }

    /// Sub-collection `name` of document `id`.
    pub fn sub_collection(&self, id: &str, name: &str) -> StellarmindResult<CollectionPath> {
        CollectionPath::new(format!("{}/{}/{}", self.0, id, name))
    }

    /// Path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CollectionPath {
    type Error = stellarmind_error::StellarmindError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<CollectionPath> for String {
    fn from(path: CollectionPath) -> Self {
        path.0
    }
}

/// Path of a single document, e.g. `artifacts/app/users/uid/creativeCanvas/main`.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentPath(String);

impl DocumentPath {
    /// Validate `raw` as a document path.
    pub fn new(raw: impl Into<String>) -> StellarmindResult<Self> {
        let raw = raw.into();
        if segments(&raw)?.len() % 2 == 1 {
            return Err(StorageError::new(StorageErrorKind::InvalidPath(raw)).into());
        }
        Ok(Self(raw))
    }

    /// Collection holding this document.
    pub fn parent(&self) -> CollectionPath {
        match self.0.rsplit_once('/') {
            Some((parent, _)) => CollectionPath(parent.to_string()),
            None => CollectionPath(String::new()),
        }
    }

    /// Last segment of the path.
    pub fn id(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// Path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DocumentPath {
    type Error = stellarmind_error::StellarmindError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<DocumentPath> for String {
    fn from(path: DocumentPath) -> Self {
        path.0
    }
}
