// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Faturamento ---
        handlers::uploads::upload_sales,
        handlers::sales::list_month_days,
        handlers::sales::list_responsible_totals,

        // --- Metas ---
        handlers::goals::create_goal,
        handlers::goals::list_goals,
        handlers::goals::update_goal,
        handlers::goals::delete_goal,
        handlers::goals::get_goal_reward,

        // --- Premiação ---
        handlers::rewards::get_bands,
        handlers::rewards::update_bands,
        handlers::rewards::reset_bands,
    ),
    components(
        schemas(
            handlers::uploads::UploadForm,
            models::sales::SaleRecord,
            models::sales::DailyBucket,
            models::sales::UploadResponse,
            models::sales::UploadStatistics,
            models::sales::ResponsibleTotal,
            models::goals::Goal,
            models::goals::GoalPayload,
            models::goals::RewardMode,
            models::rewards::RewardBand,
            models::rewards::RewardBandTable,
            models::rewards::UpdateBandsRequest,
            models::rewards::RewardSummary,
        )
    ),
    tags(
        (name = "Faturamento", description = "Importação de planilhas e leitura das vendas diárias"),
        (name = "Metas", description = "Metas por responsável e cálculo de remuneração"),
        (name = "Premiação", description = "Tabela de faixas de premiação por unidade")
    )
)]
pub struct ApiDoc;
