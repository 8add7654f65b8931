// src/services/ingestion_service.rs

use crate::{
    common::error::AppError,
    db::SalesRepository,
    models::{sales::IngestionStats, unit::Unit},
    services::{aggregator::group_by_day, row_normalizer::RowNormalizer, spreadsheet},
};

#[derive(Clone)]
pub struct IngestionService {
    sales_repo: SalesRepository,
    normalizer: RowNormalizer,
}

impl IngestionService {
    pub fn new(sales_repo: SalesRepository) -> Self {
        Self { sales_repo, normalizer: RowNormalizer::new() }
    }

    /// Importa uma planilha de vendas para a unidade.
    ///
    /// Cada dia tocado pelo arquivo é sobrescrito por inteiro, em um único
    /// lote: ou todos os dias são gravados, ou nenhum. Linhas sem data válida
    /// são descartadas e contadas em `rows_with_errors`.
    pub async fn ingest(&self, file_bytes: &[u8], unit_id: &str) -> Result<IngestionStats, AppError> {
        // 1. Unidade antes de qualquer leitura
        let unit: Unit = unit_id.parse()?;

        // 2. Arquivo -> linhas brutas
        let rows = spreadsheet::read_rows(file_bytes)?;

        // 3. Normalização linha a linha
        let mut stats = IngestionStats { total_rows: rows.len(), ..Default::default() };
        let mut sales = Vec::with_capacity(rows.len());

        for row in &rows {
            match self.normalizer.normalize(row) {
                Ok(sale) => sales.push(sale),
                Err(reason) => {
                    tracing::debug!("Linha {} ignorada: {}", row.line(), reason);
                    stats.rows_with_errors += 1;
                }
            }
        }
        stats.rows_processed = sales.len();

        // 4. Agrupamento por dia
        let days = group_by_day(sales);
        if days.is_empty() {
            return Err(AppError::NoValidRows);
        }

        // 5. Commit único
        stats.days_written = self.sales_repo.replace_days(unit, days).await.map_err(|e| {
            tracing::error!("🔥 Falha ao gravar faturamento da unidade {}: {:?}", unit, e);
            match e {
                AppError::PersistenceError(_) => e,
                other => AppError::PersistenceError(other.to_string()),
            }
        })?;

        if stats.has_warnings() {
            tracing::warn!(
                "Unidade {}: {} de {} linhas ignoradas",
                unit, stats.rows_with_errors, stats.total_rows
            );
        }
        tracing::info!(
            "✅ Faturamento importado: unidade={} linhas={} processadas={} dias={}",
            unit, stats.total_rows, stats.rows_processed, stats.days_written
        );

        Ok(stats)
    }
}
