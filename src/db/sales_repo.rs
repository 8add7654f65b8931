// src/db/sales_repo.rs

use std::{collections::BTreeMap, sync::Arc};

use chrono::{NaiveDate, Utc};

use crate::{
    common::error::AppError,
    db::document_store::{day_bucket_path, month_days_collection, DocumentStore, WriteBatch},
    models::{
        period::Period,
        sales::{DailyBucket, SaleRecord},
        unit::Unit,
    },
};

// Responsável pelos documentos diários de vendas
#[derive(Clone)]
pub struct SalesRepository {
    store: Arc<dyn DocumentStore>,
}

impl SalesRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Grava um documento por dia, sobrescrevendo o que existia, em um único
    /// lote. Retorna quantos dias foram escritos.
    pub async fn replace_days(
        &self,
        unit: Unit,
        days: BTreeMap<NaiveDate, Vec<SaleRecord>>,
    ) -> Result<usize, AppError> {
        let processed_at = Utc::now();
        let mut batch = WriteBatch::new();

        for (date, sales) in days {
            let bucket = DailyBucket {
                date: date.format("%Y-%m-%d").to_string(),
                sales,
                created_at: None,
                processed_at,
            };
            batch.set_with_server_timestamps(day_bucket_path(unit, date), &bucket, &["createdAt"])?;
        }

        let written = batch.len();
        self.store.commit(batch).await?;
        Ok(written)
    }

    pub async fn get_day(&self, unit: Unit, date: NaiveDate) -> Result<Option<DailyBucket>, AppError> {
        match self.store.get(&day_bucket_path(unit, date)).await? {
            Some(doc) => Ok(Some(serde_json::from_value(doc)?)),
            None => Ok(None),
        }
    }

    /// Todos os dias gravados no mês, em ordem de data.
    pub async fn list_month(&self, unit: Unit, period: Period) -> Result<Vec<DailyBucket>, AppError> {
        let docs = self.store.list(&month_days_collection(unit, period)).await?;

        let mut buckets = docs
            .into_iter()
            .map(|(_, doc)| serde_json::from_value::<DailyBucket>(doc))
            .collect::<Result<Vec<_>, _>>()?;

        buckets.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(buckets)
    }
}
