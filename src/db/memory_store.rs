// src/db/memory_store.rs

use std::{
    collections::BTreeMap,
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::{
    common::error::AppError,
    db::document_store::{parent_collection, DocumentStore, WriteBatch, WriteOp},
};

/// Armazenamento em memória com a mesma semântica do Postgres.
/// Usado em testes e em execuções locais sem banco.
#[derive(Default)]
pub struct MemoryDocumentStore {
    docs: RwLock<BTreeMap<String, Value>>,
    commits: AtomicUsize,
    reject_commits: AtomicBool,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Quantidade de lotes efetivamente gravados.
    pub fn commit_count(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    /// Faz os próximos commits falharem, simulando indisponibilidade.
    pub fn set_reject_commits(&self, reject: bool) {
        self.reject_commits.store(reject, Ordering::SeqCst);
    }

    pub async fn is_empty(&self) -> bool {
        self.docs.read().await.is_empty()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, path: &str) -> Result<Option<Value>, AppError> {
        Ok(self.docs.read().await.get(path).cloned())
    }

    async fn list(&self, collection: &str) -> Result<Vec<(String, Value)>, AppError> {
        let docs = self.docs.read().await;
        Ok(docs
            .iter()
            .filter(|(path, _)| parent_collection(path) == collection)
            .map(|(path, data)| (path.clone(), data.clone()))
            .collect())
    }

    async fn commit(&self, batch: WriteBatch) -> Result<(), AppError> {
        if self.reject_commits.load(Ordering::SeqCst) {
            return Err(AppError::PersistenceError("armazenamento indisponível".into()));
        }

        // Segura o lock de escrita durante todo o lote: ninguém vê meio commit.
        let mut docs = self.docs.write().await;
        let now = serde_json::to_value(Utc::now())?;

        for op in batch.into_ops() {
            match op {
                WriteOp::Set { path, mut data, server_timestamps } => {
                    if let Some(obj) = data.as_object_mut() {
                        for field in server_timestamps {
                            obj.insert(field, now.clone());
                        }
                    }
                    docs.insert(path, data);
                }
                WriteOp::Delete { path } => {
                    docs.remove(&path);
                }
            }
        }

        self.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn set_overwrites_the_whole_document() {
        let store = MemoryDocumentStore::new();

        let mut batch = WriteBatch::new();
        batch.set("c/doc", &json!({"a": 1, "b": 2})).unwrap();
        store.commit(batch).await.unwrap();

        let mut batch = WriteBatch::new();
        batch.set("c/doc", &json!({"a": 3})).unwrap();
        store.commit(batch).await.unwrap();

        assert_eq!(store.get("c/doc").await.unwrap(), Some(json!({"a": 3})));
        assert_eq!(store.commit_count(), 2);
    }

    #[tokio::test]
    async fn fills_server_timestamps_on_commit() {
        let store = MemoryDocumentStore::new();
        let mut batch = WriteBatch::new();
        batch.set_with_server_timestamps("c/doc", &json!({"a": 1}), &["createdAt"]).unwrap();
        store.commit(batch).await.unwrap();

        let doc = store.get("c/doc").await.unwrap().unwrap();
        assert!(doc["createdAt"].is_string());
    }

    #[tokio::test]
    async fn list_returns_direct_children_only() {
        let store = MemoryDocumentStore::new();
        let mut batch = WriteBatch::new();
        batch.set("c/1", &json!({})).unwrap();
        batch.set("c/2", &json!({})).unwrap();
        batch.set("c/2/sub/3", &json!({})).unwrap();
        batch.set("other/4", &json!({})).unwrap();
        store.commit(batch).await.unwrap();

        let paths: Vec<String> = store.list("c").await.unwrap().into_iter().map(|(p, _)| p).collect();
        assert_eq!(paths, vec!["c/1".to_string(), "c/2".to_string()]);
    }

    #[tokio::test]
    async fn rejected_commit_writes_nothing() {
        let store = MemoryDocumentStore::new();
        store.set_reject_commits(true);

        let mut batch = WriteBatch::new();
        batch.set("c/1", &json!({})).unwrap();
        let err = store.commit(batch).await.unwrap_err();

        assert!(matches!(err, AppError::PersistenceError(_)));
        assert!(store.is_empty().await);
        assert_eq!(store.commit_count(), 0);
    }
}
