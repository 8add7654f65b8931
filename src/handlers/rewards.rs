// src/handlers/rewards.rs

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::{
        rewards::{RewardBandTable, UpdateBandsRequest},
        unit::Unit,
    },
};

// GET /api/faturamento/{unit_id}/premiacao
#[utoipa::path(
    get,
    path = "/api/faturamento/{unit_id}/premiacao",
    tag = "Premiação",
    params(("unit_id" = String, Path, description = "Id da unidade")),
    responses(
        (status = 200, description = "Tabela de premiação (gerada na primeira leitura)", body = RewardBandTable)
    )
)]
pub async fn get_bands(
    State(app_state): State<AppState>,
    Path(unit_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let unit: Unit = unit_id.parse()?;
    let table = app_state.reward_config_service.get_or_create(unit).await?;
    Ok((StatusCode::OK, Json(table)))
}

// PUT /api/faturamento/{unit_id}/premiacao
#[utoipa::path(
    put,
    path = "/api/faturamento/{unit_id}/premiacao",
    tag = "Premiação",
    request_body = UpdateBandsRequest,
    params(("unit_id" = String, Path, description = "Id da unidade")),
    responses(
        (status = 200, description = "Tabela substituída", body = RewardBandTable),
        (status = 400, description = "Faixa com valor negativo")
    )
)]
pub async fn update_bands(
    State(app_state): State<AppState>,
    Path(unit_id): Path<String>,
    payload: Result<Json<UpdateBandsRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let unit: Unit = unit_id.parse()?;
    let Json(payload) = payload?;
    let table = app_state.reward_config_service.update(unit, payload.premiacao).await?;
    Ok((StatusCode::OK, Json(table)))
}

// POST /api/faturamento/{unit_id}/premiacao/padrao
#[utoipa::path(
    post,
    path = "/api/faturamento/{unit_id}/premiacao/padrao",
    tag = "Premiação",
    params(("unit_id" = String, Path, description = "Id da unidade")),
    responses(
        (status = 200, description = "Tabela padrão regravada", body = RewardBandTable)
    )
)]
pub async fn reset_bands(
    State(app_state): State<AppState>,
    Path(unit_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let unit: Unit = unit_id.parse()?;
    let table = app_state.reward_config_service.reset_to_default(unit).await?;
    Ok((StatusCode::OK, Json(table)))
}
