//! In-process document store.
//!
//! Used for local runs without a database and by the API integration tests.

use async_trait::async_trait;
use overlay_core::types::DocumentId;
use tokio::sync::RwLock;

use crate::store::{DocumentStore, StoreError, StoredDocument};

struct Entry {
    collection: String,
    document: StoredDocument,
}

/// Keeps documents in insertion order behind an async `RwLock`.
///
/// Designed to be wrapped in `Arc` and shared across handlers.
#[derive(Default)]
pub struct MemoryDocumentStore {
    entries: RwLock<Vec<Entry>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection.
    pub async fn count(&self, collection: &str) -> usize {
        self.entries
            .read()
            .await
            .iter()
            .filter(|e| e.collection == collection)
            .count()
    }
}

fn position(entries: &[Entry], collection: &str, id: DocumentId) -> Option<usize> {
    entries
        .iter()
        .position(|e| e.collection == collection && e.document.id == id)
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn find_all(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError> {
        Ok(self
            .entries
            .read()
            .await
            .iter()
            .filter(|e| e.collection == collection)
            .map(|e| e.document.clone())
            .collect())
    }

    async fn find_by_id(
        &self,
        collection: &str,
        id: DocumentId,
    ) -> Result<Option<StoredDocument>, StoreError> {
        let entries = self.entries.read().await;
        Ok(position(&entries, collection, id).map(|i| entries[i].document.clone()))
    }

    async fn find_first(&self, collection: &str) -> Result<Option<StoredDocument>, StoreError> {
        Ok(self
            .entries
            .read()
            .await
            .iter()
            .find(|e| e.collection == collection)
            .map(|e| e.document.clone()))
    }

    async fn insert(
        &self,
        collection: &str,
        body: serde_json::Value,
    ) -> Result<DocumentId, StoreError> {
        let id = DocumentId::generate();
        self.entries.write().await.push(Entry {
            collection: collection.to_string(),
            document: StoredDocument { id, body },
        });
        Ok(id)
    }

    async fn replace(
        &self,
        collection: &str,
        id: DocumentId,
        body: serde_json::Value,
    ) -> Result<bool, StoreError> {
        let mut entries = self.entries.write().await;
        match position(&entries, collection, id) {
            Some(i) => {
                entries[i].document.body = body;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, collection: &str, id: DocumentId) -> Result<bool, StoreError> {
        let mut entries = self.entries.write().await;
        match position(&entries, collection, id) {
            Some(i) => {
                entries.remove(i);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
