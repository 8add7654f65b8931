// src/db/document_store.rs

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use serde_json::Value;

use crate::{
    common::error::AppError,
    models::{period::Period, unit::Unit},
};

// =========================================================================
//  CAMINHOS
// =========================================================================
// Os segmentos abaixo são compartilhados com os dados já gravados e não
// podem mudar.

const ROOT: &str = "faturamento";

pub fn day_bucket_path(unit: Unit, date: NaiveDate) -> String {
    format!("{ROOT}/{unit}/{:04}/{:02}/dias/{:02}", date.year(), date.month(), date.day())
}

pub fn month_days_collection(unit: Unit, period: Period) -> String {
    format!("{ROOT}/{unit}/{:04}/{}/dias", period.year, period.month_segment())
}

pub fn goals_collection(unit: Unit) -> String {
    format!("{ROOT}/{unit}/metas")
}

pub fn goal_path(unit: Unit, goal_id: &str) -> String {
    format!("{}/{goal_id}", goals_collection(unit))
}

pub fn reward_bands_path(unit: Unit) -> String {
    format!("{ROOT}/{unit}/configRemuneracao/premiacao")
}

/// Coleção de um documento: tudo antes do último '/'.
pub fn parent_collection(path: &str) -> &str {
    path.rsplit_once('/').map(|(parent, _)| parent).unwrap_or("")
}

// =========================================================================
//  LOTE DE ESCRITA
// =========================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    /// Sobrescreve o documento inteiro. Os campos listados em
    /// `server_timestamps` recebem o relógio do armazenamento no commit.
    Set {
        path: String,
        data: Value,
        server_timestamps: Vec<String>,
    },
    Delete { path: String },
}

/// Conjunto de escritas aplicado tudo-ou-nada por `DocumentStore::commit`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set<T: Serialize>(&mut self, path: impl Into<String>, doc: &T) -> Result<&mut Self, AppError> {
        self.set_with_server_timestamps(path, doc, &[])
    }

    pub fn set_with_server_timestamps<T: Serialize>(
        &mut self,
        path: impl Into<String>,
        doc: &T,
        fields: &[&str],
    ) -> Result<&mut Self, AppError> {
        let data = serde_json::to_value(doc)?;
        if !data.is_object() {
            return Err(AppError::PersistenceError("documento precisa ser um objeto JSON".into()));
        }
        self.ops.push(WriteOp::Set {
            path: path.into(),
            data,
            server_timestamps: fields.iter().map(|f| f.to_string()).collect(),
        });
        Ok(self)
    }

    pub fn delete(&mut self, path: impl Into<String>) -> &mut Self {
        self.ops.push(WriteOp::Delete { path: path.into() });
        self
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn ops(&self) -> &[WriteOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<WriteOp> {
        self.ops
    }
}

// =========================================================================
//  ARMAZENAMENTO
// =========================================================================

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, path: &str) -> Result<Option<Value>, AppError>;

    /// Documentos filhos diretos da coleção, ordenados pelo caminho.
    async fn list(&self, collection: &str) -> Result<Vec<(String, Value)>, AppError>;

    /// Aplica o lote inteiro ou nada. Falhas viram `AppError::PersistenceError`.
    async fn commit(&self, batch: WriteBatch) -> Result<(), AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builds_storage_paths() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(day_bucket_path(Unit::Centro, date), "faturamento/centro/2024/03/dias/05");
        assert_eq!(
            month_days_collection(Unit::Centro, Period { year: 2024, month: 3 }),
            "faturamento/centro/2024/03/dias"
        );
        assert_eq!(goal_path(Unit::ZonaSul, "abc"), "faturamento/zona-sul/metas/abc");
        assert_eq!(
            reward_bands_path(Unit::Matriz),
            "faturamento/matriz/configRemuneracao/premiacao"
        );
    }

    #[test]
    fn parent_collection_strips_document_id() {
        assert_eq!(parent_collection("faturamento/centro/metas/abc"), "faturamento/centro/metas");
        assert_eq!(parent_collection("solto"), "");
    }

    #[test]
    fn batch_rejects_non_object_documents() {
        let mut batch = WriteBatch::new();
        assert!(batch.set("a/b", &json!([1, 2])).is_err());
        assert!(batch.is_empty());

        batch.set_with_server_timestamps("a/b", &json!({"x": 1}), &["createdAt"]).unwrap();
        batch.delete("a/c");
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.ops()[1], WriteOp::Delete { path: "a/c".into() });
    }
}
