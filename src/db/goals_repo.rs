// src/db/goals_repo.rs

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::document_store::{goal_path, goals_collection, DocumentStore, WriteBatch},
    models::{goals::Goal, unit::Unit},
};

#[derive(Clone)]
pub struct GoalRepository {
    store: Arc<dyn DocumentStore>,
}

impl GoalRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn find_by_id(&self, unit: Unit, goal_id: Uuid) -> Result<Option<Goal>, AppError> {
        match self.store.get(&goal_path(unit, &goal_id.to_string())).await? {
            Some(doc) => Ok(Some(serde_json::from_value(doc)?)),
            None => Ok(None),
        }
    }

    pub async fn list(&self, unit: Unit) -> Result<Vec<Goal>, AppError> {
        let docs = self.store.list(&goals_collection(unit)).await?;
        let goals = docs
            .into_iter()
            .map(|(_, doc)| serde_json::from_value::<Goal>(doc))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(goals)
    }

    /// Cria ou substitui a meta (upsert pelo id).
    pub async fn save(&self, unit: Unit, mut goal: Goal) -> Result<Goal, AppError> {
        goal.updated_at = Some(Utc::now());

        let mut batch = WriteBatch::new();
        batch.set(goal_path(unit, &goal.id.to_string()), &goal)?;
        self.store.commit(batch).await?;

        Ok(goal)
    }

    pub async fn delete(&self, unit: Unit, goal_id: Uuid) -> Result<(), AppError> {
        let mut batch = WriteBatch::new();
        batch.delete(goal_path(unit, &goal_id.to_string()));
        self.store.commit(batch).await
    }
}
