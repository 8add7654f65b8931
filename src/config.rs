// src/config.rs

use std::{env, str::FromStr, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{DocumentStore, GoalRepository, PgDocumentStore, RewardConfigRepository, SalesRepository},
    models::rewards::CommissionRates,
    services::{
        goal_service::GoalService, ingestion_service::IngestionService, reward_engine::RewardEngine,
        rewards_service::RewardConfigService, sales_service::SalesService,
    },
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: Option<String>,
    pub bind_addr: String,
    pub max_upload_bytes: usize,
    pub commission_rates: CommissionRates,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: None,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            commission_rates: CommissionRates::default(),
        }
    }
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let rates = CommissionRates {
            below_goal: parse_var("COMMISSION_RATE_BELOW_GOAL")?.unwrap_or(defaults.commission_rates.below_goal),
            at_or_above_goal: parse_var("COMMISSION_RATE_AT_GOAL")?
                .unwrap_or(defaults.commission_rates.at_or_above_goal),
        };
        if rates.below_goal.is_sign_negative() || rates.at_or_above_goal.is_sign_negative() {
            anyhow::bail!("As taxas de comissão não podem ser negativas");
        }

        Ok(Self {
            database_url: env::var("DATABASE_URL").ok(),
            bind_addr: env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            max_upload_bytes: parse_var::<usize>("MAX_UPLOAD_BYTES")?.unwrap_or(defaults.max_upload_bytes),
            commission_rates: rates,
        })
    }
}

fn parse_var<T>(name: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("{} inválida: '{}'", name, raw)),
        Err(_) => Ok(None),
    }
}

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub ingestion_service: IngestionService,
    pub sales_service: SalesService,
    pub goal_service: GoalService,
    pub reward_config_service: RewardConfigService,
}

impl AppState {
    /// Estado de produção: Postgres a partir de `DATABASE_URL`.
    pub async fn new(settings: Settings) -> anyhow::Result<(Self, PgPool)> {
        let database_url = settings
            .database_url
            .clone()
            .context("DATABASE_URL deve ser definida")?;

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        let store: Arc<dyn DocumentStore> = Arc::new(PgDocumentStore::new(db_pool.clone()));
        Ok((Self::with_store(store, settings), db_pool))
    }

    // --- Monta o gráfico de dependências ---
    pub fn with_store(store: Arc<dyn DocumentStore>, settings: Settings) -> Self {
        let sales_repo = SalesRepository::new(store.clone());
        let goal_repo = GoalRepository::new(store.clone());
        let reward_repo = RewardConfigRepository::new(store);

        let ingestion_service = IngestionService::new(sales_repo.clone());
        let sales_service = SalesService::new(sales_repo);
        let reward_config_service = RewardConfigService::new(reward_repo);
        let engine = RewardEngine::new(settings.commission_rates);
        let goal_service = GoalService::new(
            goal_repo,
            sales_service.clone(),
            reward_config_service.clone(),
            engine,
        );

        Self { settings, ingestion_service, sales_service, goal_service, reward_config_service }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn defaults_use_three_and_five_percent() {
        let settings = Settings::default();
        assert_eq!(settings.commission_rates.below_goal, Decimal::new(3, 2));
        assert_eq!(settings.commission_rates.at_or_above_goal, Decimal::new(5, 2));
        assert_eq!(settings.bind_addr, "0.0.0.0:3000");
    }
}
