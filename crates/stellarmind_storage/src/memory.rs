//! In-memory document store.

use async_trait::async_trait;
use futures_util::StreamExt;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use stellarmind_error::{StellarmindResult, StorageError, StorageErrorKind};
use stellarmind_interface::{
    CollectionPath, DocumentChange, DocumentChangeStream, DocumentPath, DocumentStore,
    StoredDocument,
};
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tracing::{debug, instrument, warn};

const CHANGE_BUFFER: usize = 256;

type Collections = HashMap<CollectionPath, Vec<StoredDocument>>;

/// Document store held entirely in memory.
///
/// Cloning shares the same documents and subscribers.
#[derive(Debug, Clone)]
pub struct InMemoryDocumentStore {
    collections: Arc<RwLock<Collections>>,
    changes: broadcast::Sender<(CollectionPath, DocumentChange)>,
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> StorageError {
    StorageError::new(StorageErrorKind::Backend("document lock poisoned".to_string()))
}

fn require_object(path: &DocumentPath, data: &serde_json::Value) -> Result<(), StorageError> {
    if data.is_object() {
        Ok(())
    } else {
        Err(StorageError::new(StorageErrorKind::NotAnObject(
            path.to_string(),
        )))
    }
}

/// Overlay the top-level fields of `update` onto `existing`.
fn merge_into(existing: &mut serde_json::Value, update: serde_json::Value) {
    match (existing, update) {
        (serde_json::Value::Object(target), serde_json::Value::Object(fields)) => {
            for (name, value) in fields {
                target.insert(name, value);
            }
        }
        (existing, update) => *existing = update,
    }
}

impl InMemoryDocumentStore {
    /// Empty store.
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_BUFFER);
        Self {
            collections: Arc::new(RwLock::new(HashMap::new())),
            changes,
        }
    }

    /// Number of documents in `collection`.
    pub fn len(&self, collection: &CollectionPath) -> usize {
        self.collections
            .read()
            .map(|collections| collections.get(collection).map_or(0, Vec::len))
            .unwrap_or(0)
    }

    fn publish(&self, collection: CollectionPath, change: DocumentChange) {
        // No receivers is fine: nobody is listening yet.
        let _ = self.changes.send((collection, change));
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    #[instrument(skip(self, data), fields(collection = %collection))]
    async fn add(
        &self,
        collection: &CollectionPath,
        data: serde_json::Value,
    ) -> StellarmindResult<DocumentPath> {
        let id = uuid::Uuid::new_v4().simple().to_string();
        let path = collection.doc(&id)?;
        require_object(&path, &data)?;

        let document = StoredDocument::new(path.clone(), data);
        {
            let mut collections = self.collections.write().map_err(|_| poisoned())?;
            collections
                .entry(collection.clone())
                .or_default()
                .push(document.clone());
        }

        debug!(id = %id, "Document added");
        self.publish(collection.clone(), DocumentChange::Added(document));
        Ok(path)
    }

    async fn get(&self, path: &DocumentPath) -> StellarmindResult<Option<serde_json::Value>> {
        let collections = self.collections.read().map_err(|_| poisoned())?;
        let found = collections.get(&path.parent()).and_then(|documents| {
            documents
                .iter()
                .find(|doc| doc.path() == path)
                .map(|doc| doc.data().clone())
        });
        Ok(found)
    }

    #[instrument(skip(self, data), fields(path = %path))]
    async fn set(
        &self,
        path: &DocumentPath,
        data: serde_json::Value,
        merge: bool,
    ) -> StellarmindResult<()> {
        require_object(path, &data)?;
        let collection = path.parent();

        let change = {
            let mut collections = self.collections.write().map_err(|_| poisoned())?;
            let documents = collections.entry(collection.clone()).or_default();
            match documents.iter_mut().find(|doc| doc.path() == path) {
                Some(existing) => {
                    let mut body = existing.data().clone();
                    if merge {
                        merge_into(&mut body, data);
                    } else {
                        body = data;
                    }
                    *existing = StoredDocument::new(path.clone(), body);
                    DocumentChange::Modified(existing.clone())
                }
                None => {
                    let document = StoredDocument::new(path.clone(), data);
                    documents.push(document.clone());
                    DocumentChange::Added(document)
                }
            }
        };

        debug!(merge, "Document written");
        self.publish(collection, change);
        Ok(())
    }

    async fn list(&self, collection: &CollectionPath) -> StellarmindResult<Vec<StoredDocument>> {
        let collections = self.collections.read().map_err(|_| poisoned())?;
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    fn subscribe(&self, collection: &CollectionPath) -> DocumentChangeStream {
        let wanted = collection.clone();
        let stream = BroadcastStream::new(self.changes.subscribe()).filter_map(move |item| {
            let change = match item {
                Ok((collection, change)) if collection == wanted => Some(change),
                Ok(_) => None,
                Err(lagged) => {
                    warn!(error = %lagged, "Subscriber fell behind; changes dropped");
                    None
                }
            };
            futures_util::future::ready(change)
        });
        Box::pin(stream)
    }
}
