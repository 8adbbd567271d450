use async_trait::async_trait;
use overlay_core::types::DocumentId;

/// Errors raised by a [`DocumentStore`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Document (de)serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A raw document body together with its identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: DocumentId,
    pub body: serde_json::Value,
}

/// Find/insert/replace/delete over named collections of JSON documents.
///
/// Implementations must return documents of a collection in insertion order.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents in a collection.
    async fn find_all(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError>;

    /// The document with the given id, if any.
    async fn find_by_id(
        &self,
        collection: &str,
        id: DocumentId,
    ) -> Result<Option<StoredDocument>, StoreError>;

    /// The oldest document in a collection, if any.
    async fn find_first(&self, collection: &str) -> Result<Option<StoredDocument>, StoreError>;

    /// Insert a new document and return the identifier assigned to it.
    async fn insert(
        &self,
        collection: &str,
        body: serde_json::Value,
    ) -> Result<DocumentId, StoreError>;

    /// Replace the body of an existing document.
    ///
    /// Returns `false` if no document with that id exists.
    async fn replace(
        &self,
        collection: &str,
        id: DocumentId,
        body: serde_json::Value,
    ) -> Result<bool, StoreError>;

    /// Delete a document. Returns `true` if one was removed.
    async fn delete(&self, collection: &str, id: DocumentId) -> Result<bool, StoreError>;

    /// Check that the backing store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
