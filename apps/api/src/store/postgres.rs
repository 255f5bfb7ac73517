use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;

use super::{Document, DocumentStore, StoreError};

/// JSONB-backed document store. One row per (collection, id).
#[derive(Clone)]
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
    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, StoreError> {
        let fields: Option<Value> =
            sqlx::query_scalar("SELECT fields FROM documents WHERE collection = $1 AND id = $2")
                .bind(collection)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(fields.map(|v| match v {
            Value::Object(map) => map,
            _ => Document::new(),
        }))
    }

    async fn set_document(
        &self,
        collection: &str,
        id: &str,
        fields: Document,
        merge: bool,
    ) -> Result<(), StoreError> {
        // `||` on JSONB objects is a shallow merge where the right side wins.
        let sql = if merge {
            r#"
            INSERT INTO documents (collection, id, fields, updated_at)
            VALUES ($1, $2, $3, now())
            ON CONFLICT (collection, id)
            DO UPDATE SET fields = documents.fields || EXCLUDED.fields, updated_at = now()
            "#
        } else {
            r#"
            INSERT INTO documents (collection, id, fields, updated_at)
            VALUES ($1, $2, $3, now())
            ON CONFLICT (collection, id)
            DO UPDATE SET fields = EXCLUDED.fields, updated_at = now()
            "#
        };

        sqlx::query(sql)
            .bind(collection)
            .bind(id)
            .bind(Value::Object(fields))
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
