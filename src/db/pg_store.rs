// src/db/pg_store.rs

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{PgPool, Row};

use crate::{
    common::error::AppError,
    db::document_store::{parent_collection, DocumentStore, WriteBatch, WriteOp},
};

// Documentos JSON na tabela 'documents', endereçados pelo caminho completo.
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
    async fn get(&self, path: &str) -> Result<Option<Value>, AppError> {
        let row = sqlx::query("SELECT data FROM documents WHERE path = $1")
            .bind(path)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.get::<Value, _>("data")))
    }

    async fn list(&self, collection: &str) -> Result<Vec<(String, Value)>, AppError> {
        let rows = sqlx::query("SELECT path, data FROM documents WHERE collection = $1 ORDER BY path ASC")
            .bind(collection)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| (r.get::<String, _>("path"), r.get::<Value, _>("data")))
            .collect())
    }

    async fn commit(&self, batch: WriteBatch) -> Result<(), AppError> {
        let persistence = |e: sqlx::Error| AppError::PersistenceError(e.to_string());

        // Uma transação por lote: ou todos os dias entram, ou nenhum.
        let mut tx = self.pool.begin().await.map_err(persistence)?;

        for op in batch.into_ops() {
            match op {
                WriteOp::Set { path, data, server_timestamps } => {
                    let collection = parent_collection(&path).to_string();
                    sqlx::query(
                        r#"
                        INSERT INTO documents (path, collection, data, updated_at)
                        VALUES (
                            $1, $2,
                            $3::jsonb || COALESCE(
                                (SELECT jsonb_object_agg(field, to_jsonb(NOW()))
                                 FROM unnest($4::text[]) AS field),
                                '{}'::jsonb
                            ),
                            NOW()
                        )
                        ON CONFLICT (path)
                        DO UPDATE SET
                            data = EXCLUDED.data,
                            updated_at = NOW()
                        "#,
                    )
                    .bind(&path)
                    .bind(&collection)
                    .bind(&data)
                    .bind(&server_timestamps)
                    .execute(&mut *tx)
                    .await
                    .map_err(persistence)?;
                }
                WriteOp::Delete { path } => {
                    sqlx::query("DELETE FROM documents WHERE path = $1")
                        .bind(&path)
                        .execute(&mut *tx)
                        .await
                        .map_err(persistence)?;
                }
            }
        }

        tx.commit().await.map_err(persistence)?;
        Ok(())
    }
}
