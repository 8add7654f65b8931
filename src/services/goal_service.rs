// src/services/goal_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::GoalRepository,
    models::{
        goals::{Goal, GoalPayload, RewardMode},
        period::Period,
        rewards::RewardSummary,
        unit::Unit,
    },
    services::{
        reward_engine::{percent_achieved, RewardEngine},
        rewards_service::RewardConfigService,
        sales_service::SalesService,
    },
};

#[derive(Clone)]
pub struct GoalService {
    repo: GoalRepository,
    sales_service: SalesService,
    reward_config: RewardConfigService,
    engine: RewardEngine,
}

impl GoalService {
    pub fn new(
        repo: GoalRepository,
        sales_service: SalesService,
        reward_config: RewardConfigService,
        engine: RewardEngine,
    ) -> Self {
        Self { repo, sales_service, reward_config, engine }
    }

    // --- CRUD ---

    pub async fn create(&self, unit: Unit, payload: GoalPayload) -> Result<Goal, AppError> {
        let goal = payload.into_goal(Uuid::new_v4());
        self.repo.save(unit, goal).await
    }

    pub async fn list(&self, unit: Unit, period: Option<Period>) -> Result<Vec<Goal>, AppError> {
        let mut goals = self.repo.list(unit).await?;
        if let Some(period) = period {
            let wanted = period.to_string();
            goals.retain(|g| g.period == wanted);
        }
        goals.sort_by(|a, b| a.period.cmp(&b.period).then_with(|| a.responsible.cmp(&b.responsible)));
        Ok(goals)
    }

    pub async fn get(&self, unit: Unit, goal_id: Uuid) -> Result<Goal, AppError> {
        self.repo.find_by_id(unit, goal_id).await?.ok_or(AppError::GoalNotFound)
    }

    pub async fn update(&self, unit: Unit, goal_id: Uuid, payload: GoalPayload) -> Result<Goal, AppError> {
        // Só atualiza metas existentes; criação é pelo POST
        self.get(unit, goal_id).await?;
        self.repo.save(unit, payload.into_goal(goal_id)).await
    }

    pub async fn delete(&self, unit: Unit, goal_id: Uuid) -> Result<(), AppError> {
        self.get(unit, goal_id).await?;
        self.repo.delete(unit, goal_id).await
    }

    // --- REMUNERAÇÃO ---

    /// Soma as vendas do responsável no período da meta e calcula a
    /// remuneração (comissão ou faixa de premiação da unidade).
    pub async fn reward_for(&self, unit: Unit, goal_id: Uuid) -> Result<RewardSummary, AppError> {
        let goal = self.get(unit, goal_id).await?;
        let period: Period = goal.period.parse()?;

        let total_sales = self
            .sales_service
            .total_for_responsible(unit, period, &goal.responsible)
            .await?;

        let reward = match goal.reward_mode {
            RewardMode::Commission => self.engine.compute_reward(&goal, total_sales, None),
            RewardMode::BonusTier => {
                let table = self.reward_config.get_or_create(unit).await?;
                self.engine.compute_reward(&goal, total_sales, Some(&table.premiacao))
            }
        };

        Ok(RewardSummary {
            percent_achieved: percent_achieved(total_sales, goal.target_amount).round_dp(2),
            meta: goal,
            total_sales,
            reward,
        })
    }
}
