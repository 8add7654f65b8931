// src/models/goals.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::period::Period;

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum RewardMode {
    #[serde(rename = "comissao")]
    Commission, // Percentual sobre o total vendido
    #[serde(rename = "premiacao")]
    BonusTier, // Valor fixo pela faixa atingida
}

// --- Structs ---

/// Documento `faturamento/{unitId}/metas/{goalId}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Goal {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,

    #[serde(rename = "responsavel")]
    #[schema(example = "Carlos Lima")]
    pub responsible: String,

    #[serde(rename = "periodo")]
    #[schema(example = "2024-03")]
    pub period: String,

    #[serde(rename = "valorMeta")]
    #[schema(example = "50000.00")]
    pub target_amount: Decimal,

    #[serde(rename = "tipoRemuneracao")]
    pub reward_mode: RewardMode,

    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn validate_not_blank(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some("O responsável é obrigatório.".into());
        return Err(err);
    }
    Ok(())
}

fn validate_period(period: &str) -> Result<(), ValidationError> {
    if period.parse::<Period>().is_err() {
        let mut err = ValidationError::new("period");
        err.message = Some("O período deve estar no formato AAAA-MM.".into());
        return Err(err);
    }
    Ok(())
}

fn validate_positive(val: &Decimal) -> Result<(), ValidationError> {
    if *val <= Decimal::ZERO {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("O valor da meta deve ser maior que zero.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct GoalPayload {
    #[serde(rename = "responsavel")]
    #[validate(custom(function = "validate_not_blank"))]
    #[schema(example = "Carlos Lima")]
    pub responsible: String,

    #[serde(rename = "periodo")]
    #[validate(custom(function = "validate_period"))]
    #[schema(example = "2024-03")]
    pub period: String,

    #[serde(rename = "valorMeta")]
    #[validate(custom(function = "validate_positive"))]
    #[schema(example = "50000.00")]
    pub target_amount: Decimal,

    #[serde(rename = "tipoRemuneracao")]
    pub reward_mode: RewardMode,
}

impl GoalPayload {
    pub fn into_goal(self, id: Uuid) -> Goal {
        Goal {
            id,
            responsible: self.responsible.trim().to_string(),
            period: self.period.trim().to_string(),
            target_amount: self.target_amount,
            reward_mode: self.reward_mode,
            updated_at: None,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct GoalListQuery {
    /// Filtra pelo período (AAAA-MM)
    #[serde(rename = "periodo")]
    pub period: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(period: &str, target: Decimal) -> GoalPayload {
        GoalPayload {
            responsible: "  Carlos Lima ".into(),
            period: period.into(),
            target_amount: target,
            reward_mode: RewardMode::Commission,
        }
    }

    #[test]
    fn accepts_well_formed_goal() {
        assert!(payload("2024-03", Decimal::new(5000, 0)).validate().is_ok());
    }

    #[test]
    fn rejects_bad_period_and_non_positive_target() {
        let errors = payload("03/2024", Decimal::ZERO).validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 2);
    }

    #[test]
    fn blank_responsible_is_rejected() {
        let mut goal = payload("2024-03", Decimal::ONE);
        goal.responsible = "   ".into();
        assert!(goal.validate().is_err());
    }

    #[test]
    fn reward_mode_uses_portuguese_tags() {
        assert_eq!(serde_json::to_value(RewardMode::BonusTier).unwrap(), "premiacao");
        let mode: RewardMode = serde_json::from_value(serde_json::json!("comissao")).unwrap();
        assert_eq!(mode, RewardMode::Commission);
    }

    #[test]
    fn into_goal_trims_text_fields() {
        let goal = payload("2024-03", Decimal::ONE).into_goal(Uuid::nil());
        assert_eq!(goal.responsible, "Carlos Lima");
    }
}
