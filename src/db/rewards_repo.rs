// src/db/rewards_repo.rs

use std::sync::Arc;

use chrono::Utc;

use crate::{
    common::error::AppError,
    db::document_store::{reward_bands_path, DocumentStore, WriteBatch},
    models::{
        rewards::{RewardBand, RewardBandTable},
        unit::Unit,
    },
};

// Tabela de premiação: faturamento/{unitId}/configRemuneracao/premiacao
#[derive(Clone)]
pub struct RewardConfigRepository {
    store: Arc<dyn DocumentStore>,
}

impl RewardConfigRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn get_bands(&self, unit: Unit) -> Result<Option<RewardBandTable>, AppError> {
        match self.store.get(&reward_bands_path(unit)).await? {
            Some(doc) => Ok(Some(serde_json::from_value(doc)?)),
            None => Ok(None),
        }
    }

    pub async fn save_bands(&self, unit: Unit, bands: Vec<RewardBand>) -> Result<RewardBandTable, AppError> {
        let table = RewardBandTable { premiacao: bands, updated_at: Some(Utc::now()) };

        let mut batch = WriteBatch::new();
        batch.set(reward_bands_path(unit), &table)?;
        self.store.commit(batch).await?;

        Ok(table)
    }
}
