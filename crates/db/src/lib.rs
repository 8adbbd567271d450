//! Document access layer.
//!
//! Documents live in named collections and are addressed by
//! [`DocumentId`](overlay_core::types::DocumentId). [`DocumentStore`] is the
//! seam the API depends on; [`PgDocumentStore`] keeps documents as JSONB rows
//! and [`MemoryDocumentStore`] keeps them in process.

use sqlx::postgres::PgPoolOptions;

pub mod collection;
pub mod memory;
pub mod postgres;
pub mod store;

pub use collection::Collection;
pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;
pub use store::{DocumentStore, StoreError, StoredDocument};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the bundled migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
