// src/models/sales.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// --- 1. Venda normalizada (uma linha válida da planilha) ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    #[serde(rename = "produto")]
    #[schema(example = "Plano Anual")]
    pub product: String,

    #[serde(rename = "cliente")]
    #[schema(example = "Maria Oliveira")]
    pub customer_name: String,

    #[serde(rename = "responsavel")]
    #[schema(example = "Carlos Lima")]
    pub responsible: String,

    #[serde(rename = "dataCadastro")]
    #[schema(value_type = Option<String>, format = Date, example = "2024-02-28")]
    pub registered_at: Option<NaiveDate>,

    #[serde(rename = "plano")]
    #[schema(example = "Anual")]
    pub plan: String,

    #[serde(rename = "formaPagamento")]
    #[schema(example = "Cartão de Crédito")]
    pub payment_method: String,

    #[serde(rename = "valor")]
    #[schema(example = "1234.56")]
    pub amount: Decimal,

    // Chave de agrupamento por dia
    #[serde(rename = "dataVenda")]
    #[schema(value_type = String, format = Date, example = "2024-03-05")]
    pub sale_date: NaiveDate,
}

// --- 2. Documento diário: faturamento/{unitId}/{ano}/{mes}/dias/{dia} ---
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyBucket {
    #[schema(example = "2024-03-05")]
    pub date: String,

    pub sales: Vec<SaleRecord>,

    // Preenchido pelo relógio do armazenamento no commit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    pub processed_at: DateTime<Utc>,
}

// --- 3. Estatísticas de uma ingestão ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IngestionStats {
    pub total_rows: usize,
    pub rows_processed: usize,
    pub rows_with_errors: usize,
    pub days_written: usize,
}

impl IngestionStats {
    pub fn has_warnings(&self) -> bool {
        self.rows_with_errors > 0
    }
}

// --- 4. Resposta do upload (formato público, em português) ---
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadStatistics {
    pub total_linhas: usize,
    pub linhas_processadas: usize,
    pub linhas_com_erro: usize,
    pub dias_processados: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    pub estatisticas: UploadStatistics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aviso: Option<String>,
}

impl From<IngestionStats> for UploadResponse {
    fn from(stats: IngestionStats) -> Self {
        let aviso = stats.has_warnings().then(|| {
            format!(
                "{} linha(s) foram ignoradas por data de venda ausente ou inválida.",
                stats.rows_with_errors
            )
        });

        Self {
            success: true,
            message: format!(
                "Planilha processada com sucesso: {} venda(s) em {} dia(s).",
                stats.rows_processed, stats.days_written
            ),
            estatisticas: UploadStatistics {
                total_linhas: stats.total_rows,
                linhas_processadas: stats.rows_processed,
                linhas_com_erro: stats.rows_with_errors,
                dias_processados: stats.days_written,
            },
            aviso,
        }
    }
}

// --- 5. Totais por responsável no mês (relatórios) ---
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ResponsibleTotal {
    #[serde(rename = "responsavel")]
    pub responsible: String,
    #[serde(rename = "totalVendas")]
    pub total_sales: Decimal,
    #[serde(rename = "quantidadeVendas")]
    pub sales_count: usize,
}
