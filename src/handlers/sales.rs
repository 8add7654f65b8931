// src/handlers/sales.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::{
        period::Period,
        sales::{DailyBucket, ResponsibleTotal},
        unit::Unit,
    },
};

// GET /api/faturamento/{unit_id}/periodos/{period}/dias
#[utoipa::path(
    get,
    path = "/api/faturamento/{unit_id}/periodos/{period}/dias",
    tag = "Faturamento",
    params(
        ("unit_id" = String, Path, description = "Id da unidade"),
        ("period" = String, Path, description = "Mês (AAAA-MM)")
    ),
    responses(
        (status = 200, description = "Documentos diários do mês", body = Vec<DailyBucket>)
    )
)]
pub async fn list_month_days(
    State(app_state): State<AppState>,
    Path((unit_id, period)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let unit: Unit = unit_id.parse()?;
    let period: Period = period.parse()?;

    let days = app_state.sales_service.month_days(unit, period).await?;
    Ok((StatusCode::OK, Json(days)))
}

// GET /api/faturamento/{unit_id}/periodos/{period}/responsaveis
#[utoipa::path(
    get,
    path = "/api/faturamento/{unit_id}/periodos/{period}/responsaveis",
    tag = "Faturamento",
    params(
        ("unit_id" = String, Path, description = "Id da unidade"),
        ("period" = String, Path, description = "Mês (AAAA-MM)")
    ),
    responses(
        (status = 200, description = "Total vendido por responsável no mês", body = Vec<ResponsibleTotal>)
    )
)]
pub async fn list_responsible_totals(
    State(app_state): State<AppState>,
    Path((unit_id, period)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let unit: Unit = unit_id.parse()?;
    let period: Period = period.parse()?;

    let totals = app_state.sales_service.totals_by_responsible(unit, period).await?;
    Ok((StatusCode::OK, Json(totals)))
}
