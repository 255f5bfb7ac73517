//! Document store: persistence seam for profile documents.
//!
//! Handlers only ever see `Arc<dyn DocumentStore>`. Postgres backs production,
//! the in-memory store backs tests and local runs without `DATABASE_URL`.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

/// Collection holding one profile document per account id.
pub const PROFILES: &str = "profiles";

/// A stored document: a flat JSON object of top-level fields.
pub type Document = Map<String, Value>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Returns the document, or `None` when it does not exist.
    async fn get_document(&self, collection: &str, id: &str)
        -> Result<Option<Document>, StoreError>;

    /// Writes a document. With `merge`, given top-level fields overwrite and
    /// all other stored fields are kept; without it the document is replaced.
    async fn set_document(
        &self,
        collection: &str,
        id: &str,
        fields: Document,
        merge: bool,
    ) -> Result<(), StoreError>;
}
