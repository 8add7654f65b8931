// src/services/rewards_service.rs

use crate::{
    common::error::AppError,
    db::RewardConfigRepository,
    models::{
        rewards::{RewardBand, RewardBandTable},
        unit::Unit,
    },
    services::band_table::{generate_default_bands, normalize_bands},
};

// Tabela de premiação por unidade: gerada uma vez, editável depois.
#[derive(Clone)]
pub struct RewardConfigService {
    repo: RewardConfigRepository,
}

impl RewardConfigService {
    pub fn new(repo: RewardConfigRepository) -> Self {
        Self { repo }
    }

    /// Tabela gravada ou, na primeira leitura, a padrão (que passa a ser gravada).
    pub async fn get_or_create(&self, unit: Unit) -> Result<RewardBandTable, AppError> {
        if let Some(table) = self.repo.get_bands(unit).await? {
            return Ok(table);
        }

        tracing::info!("Gerando tabela de premiação padrão para a unidade {}", unit);
        self.repo.save_bands(unit, generate_default_bands(unit.id())).await
    }

    pub async fn update(&self, unit: Unit, bands: Vec<RewardBand>) -> Result<RewardBandTable, AppError> {
        let bands = normalize_bands(bands)?;
        self.repo.save_bands(unit, bands).await
    }

    pub async fn reset_to_default(&self, unit: Unit) -> Result<RewardBandTable, AppError> {
        self.repo.save_bands(unit, generate_default_bands(unit.id())).await
    }
}
