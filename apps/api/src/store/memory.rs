use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Document, DocumentStore, StoreError};

/// Process-local document store with the same merge semantics as Postgres.
#[derive(Default)]
pub struct MemoryDocumentStore {
    docs: RwLock<HashMap<(String, String), Document>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, StoreError> {
        let docs = self.docs.read().await;
        Ok(docs
            .get(&(collection.to_string(), id.to_string()))
            .cloned())
    }

    async fn set_document(
        &self,
        collection: &str,
        id: &str,
        fields: Document,
        merge: bool,
    ) -> Result<(), StoreError> {
        let mut docs = self.docs.write().await;
        let key = (collection.to_string(), id.to_string());
        if merge {
            if let Some(existing) = docs.get_mut(&key) {
                existing.extend(fields);
                return Ok(());
            }
        }
        docs.insert(key, fields);
        Ok(())
    }
}
