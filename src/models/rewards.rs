// src/models/rewards.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::goals::Goal;

// --- 1. Faixa de premiação ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RewardBand {
    /// Percentual mínimo da meta para liberar a faixa
    #[serde(rename = "percentual")]
    #[schema(example = "95")]
    pub threshold_percent: Decimal,

    #[serde(rename = "valor")]
    #[schema(example = "2000.00")]
    pub bonus_amount: Decimal,
}

impl RewardBand {
    pub fn new(threshold_percent: impl Into<Decimal>, bonus_amount: impl Into<Decimal>) -> Self {
        Self { threshold_percent: threshold_percent.into(), bonus_amount: bonus_amount.into() }
    }
}

// --- 2. Documento faturamento/{unitId}/configRemuneracao/premiacao ---
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RewardBandTable {
    pub premiacao: Vec<RewardBand>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBandsRequest {
    pub premiacao: Vec<RewardBand>,
}

// --- 3. Taxas de comissão (configuração por implantação) ---
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommissionRates {
    pub below_goal: Decimal,
    pub at_or_above_goal: Decimal,
}

impl Default for CommissionRates {
    fn default() -> Self {
        Self {
            below_goal: Decimal::new(3, 2),       // 3%
            at_or_above_goal: Decimal::new(5, 2), // 5%
        }
    }
}

// --- 4. Resultado da remuneração de uma meta ---
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RewardSummary {
    pub meta: Goal,
    #[serde(rename = "totalVendas")]
    pub total_sales: Decimal,
    #[serde(rename = "percentualAtingido")]
    pub percent_achieved: Decimal,
    #[serde(rename = "remuneracao")]
    pub reward: Decimal,
}
