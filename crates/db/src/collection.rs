//! Typed view over one collection of a [`DocumentStore`].

use std::marker::PhantomData;
use std::sync::Arc;

use overlay_core::types::{DocumentId, Stored};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::store::{DocumentStore, StoreError, StoredDocument};

/// Reads and writes documents of type `T` in a single named collection,
/// converting bodies through `serde_json`.
pub struct Collection<T> {
    store: Arc<dyn DocumentStore>,
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            name: self.name,
            _marker: PhantomData,
        }
    }
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(store: Arc<dyn DocumentStore>, name: &'static str) -> Self {
        Self {
            store,
            name,
            _marker: PhantomData,
        }
    }

    pub async fn find_all(&self) -> Result<Vec<Stored<T>>, StoreError> {
        self.store
            .find_all(self.name)
            .await?
            .into_iter()
            .map(decode)
            .collect()
    }

    pub async fn find_by_id(&self, id: DocumentId) -> Result<Option<Stored<T>>, StoreError> {
        self.store
            .find_by_id(self.name, id)
            .await?
            .map(decode)
            .transpose()
    }

    pub async fn find_first(&self) -> Result<Option<Stored<T>>, StoreError> {
        self.store.find_first(self.name).await?.map(decode).transpose()
    }

    /// Insert `document` and return it together with its new id.
    pub async fn insert(&self, document: T) -> Result<Stored<T>, StoreError> {
        let body = serde_json::to_value(&document)?;
        let id = self.store.insert(self.name, body).await?;
        Ok(Stored { id, document })
    }

    /// Replace a stored document. Returns `false` if `id` no longer exists.
    pub async fn replace(&self, id: DocumentId, document: &T) -> Result<bool, StoreError> {
        let body = serde_json::to_value(document)?;
        self.store.replace(self.name, id, body).await
    }

    pub async fn delete(&self, id: DocumentId) -> Result<bool, StoreError> {
        self.store.delete(self.name, id).await
    }
}

fn decode<T: DeserializeOwned>(raw: StoredDocument) -> Result<Stored<T>, StoreError> {
    Ok(Stored {
        id: raw.id,
        document: serde_json::from_value(raw.body)?,
    })
}
