// src/services/sales_service.rs

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::{
    common::{error::AppError, text::responsible_key},
    db::SalesRepository,
    models::{
        period::Period,
        sales::{DailyBucket, ResponsibleTotal},
        unit::Unit,
    },
};

// Leitura das vendas já importadas (relatórios e metas)
#[derive(Clone)]
pub struct SalesService {
    repo: SalesRepository,
}

impl SalesService {
    pub fn new(repo: SalesRepository) -> Self {
        Self { repo }
    }

    pub async fn month_days(&self, unit: Unit, period: Period) -> Result<Vec<DailyBucket>, AppError> {
        self.repo.list_month(unit, period).await
    }

    /// Soma das vendas do responsável no mês. O casamento é por trim +
    /// minúsculas, sem identificador estável.
    pub async fn total_for_responsible(
        &self,
        unit: Unit,
        period: Period,
        responsible: &str,
    ) -> Result<Decimal, AppError> {
        let key = responsible_key(responsible);
        let buckets = self.repo.list_month(unit, period).await?;

        Ok(buckets
            .iter()
            .flat_map(|bucket| bucket.sales.iter())
            .filter(|sale| responsible_key(&sale.responsible) == key)
            .map(|sale| sale.amount)
            .sum())
    }

    /// Totais do mês por responsável, do maior para o menor. O nome exibido
    /// é a primeira grafia encontrada.
    pub async fn totals_by_responsible(&self, unit: Unit, period: Period) -> Result<Vec<ResponsibleTotal>, AppError> {
        let buckets = self.repo.list_month(unit, period).await?;

        let mut order: Vec<String> = Vec::new();
        let mut totals: HashMap<String, ResponsibleTotal> = HashMap::new();

        for sale in buckets.iter().flat_map(|b| b.sales.iter()) {
            let key = responsible_key(&sale.responsible);
            let entry = totals.entry(key.clone()).or_insert_with(|| {
                order.push(key);
                ResponsibleTotal {
                    responsible: sale.responsible.trim().to_string(),
                    total_sales: Decimal::ZERO,
                    sales_count: 0,
                }
            });
            entry.total_sales += sale.amount;
            entry.sales_count += 1;
        }

        let mut result: Vec<ResponsibleTotal> = order.into_iter().filter_map(|k| totals.remove(&k)).collect();
        // Estável: empates mantêm a ordem de aparição
        result.sort_by(|a, b| b.total_sales.cmp(&a.total_sales));
        Ok(result)
    }
}
