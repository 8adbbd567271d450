//! PostgreSQL-backed document store.
//!
//! Every collection shares the `documents` table; a document is one row
//! holding its JSONB body.

use async_trait::async_trait;
use overlay_core::types::DocumentId;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::store::{DocumentStore, StoreError, StoredDocument};

/// Column list for `documents` queries.
const COLUMNS: &str = "id, body";

/// A row from the `documents` table.
#[derive(Debug, FromRow)]
struct DocumentRow {
    id: Uuid,
    body: serde_json::Value,
}

impl From<DocumentRow> for StoredDocument {
    fn from(row: DocumentRow) -> Self {
        StoredDocument {
            id: DocumentId::from(row.id),
            body: row.body,
        }
    }
}

/// Provides document access on top of a Postgres pool.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn find_all(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError> {
        let query = format!(
            "SELECT {COLUMNS} FROM documents WHERE collection = $1 ORDER BY created_at, id"
        );
        let rows = sqlx::query_as::<_, DocumentRow>(&query)
            .bind(collection)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(StoredDocument::from).collect())
    }

    async fn find_by_id(
        &self,
        collection: &str,
        id: DocumentId,
    ) -> Result<Option<StoredDocument>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM documents WHERE collection = $1 AND id = $2");
        let row = sqlx::query_as::<_, DocumentRow>(&query)
            .bind(collection)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(StoredDocument::from))
    }

    async fn find_first(&self, collection: &str) -> Result<Option<StoredDocument>, StoreError> {
        let query = format!(
            "SELECT {COLUMNS} FROM documents WHERE collection = $1 \
             ORDER BY created_at, id LIMIT 1"
        );
        let row = sqlx::query_as::<_, DocumentRow>(&query)
            .bind(collection)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(StoredDocument::from))
    }

    async fn insert(
        &self,
        collection: &str,
        body: serde_json::Value,
    ) -> Result<DocumentId, StoreError> {
        let id = DocumentId::generate();
        sqlx::query("INSERT INTO documents (id, collection, body) VALUES ($1, $2, $3)")
            .bind(id.as_uuid())
            .bind(collection)
            .bind(&body)
            .execute(&self.pool)
            .await?;
        tracing::debug!(collection, %id, "Document inserted");
        Ok(id)
    }

    async fn replace(
        &self,
        collection: &str,
        id: DocumentId,
        body: serde_json::Value,
    ) -> Result<bool, StoreError> {
        let result =
            sqlx::query("UPDATE documents SET body = $3 WHERE collection = $1 AND id = $2")
                .bind(collection)
                .bind(id.as_uuid())
                .bind(&body)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, collection: &str, id: DocumentId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}
