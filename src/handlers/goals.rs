// src/handlers/goals.rs

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{
        goals::{Goal, GoalListQuery, GoalPayload},
        period::Period,
        rewards::RewardSummary,
        unit::Unit,
    },
};

// POST /api/faturamento/{unit_id}/metas
#[utoipa::path(
    post,
    path = "/api/faturamento/{unit_id}/metas",
    tag = "Metas",
    request_body = GoalPayload,
    params(("unit_id" = String, Path, description = "Id da unidade")),
    responses(
        (status = 201, description = "Meta criada", body = Goal),
        (status = 400, description = "Unidade ou dados inválidos")
    )
)]
pub async fn create_goal(
    State(app_state): State<AppState>,
    Path(unit_id): Path<String>,
    payload: Result<Json<GoalPayload>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let unit: Unit = unit_id.parse()?;
    let Json(payload) = payload?;
    payload.validate()?;

    let goal = app_state.goal_service.create(unit, payload).await?;
    Ok((StatusCode::CREATED, Json(goal)))
}

// GET /api/faturamento/{unit_id}/metas?periodo=YYYY-MM
#[utoipa::path(
    get,
    path = "/api/faturamento/{unit_id}/metas",
    tag = "Metas",
    params(("unit_id" = String, Path, description = "Id da unidade"), GoalListQuery),
    responses(
        (status = 200, description = "Metas da unidade", body = Vec<Goal>)
    )
)]
pub async fn list_goals(
    State(app_state): State<AppState>,
    Path(unit_id): Path<String>,
    Query(query): Query<GoalListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let unit: Unit = unit_id.parse()?;
    let period = query.period.as_deref().map(str::parse::<Period>).transpose()?;

    let goals = app_state.goal_service.list(unit, period).await?;
    Ok((StatusCode::OK, Json(goals)))
}

// PUT /api/faturamento/{unit_id}/metas/{goal_id}
#[utoipa::path(
    put,
    path = "/api/faturamento/{unit_id}/metas/{goal_id}",
    tag = "Metas",
    request_body = GoalPayload,
    params(
        ("unit_id" = String, Path, description = "Id da unidade"),
        ("goal_id" = Uuid, Path, description = "Id da meta")
    ),
    responses(
        (status = 200, description = "Meta atualizada", body = Goal),
        (status = 404, description = "Meta não encontrada")
    )
)]
pub async fn update_goal(
    State(app_state): State<AppState>,
    path: Result<Path<(String, Uuid)>, PathRejection>,
    payload: Result<Json<GoalPayload>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path((unit_id, goal_id)) = path?;
    let unit: Unit = unit_id.parse()?;
    let Json(payload) = payload?;
    payload.validate()?;

    let goal = app_state.goal_service.update(unit, goal_id, payload).await?;
    Ok((StatusCode::OK, Json(goal)))
}

// DELETE /api/faturamento/{unit_id}/metas/{goal_id}
#[utoipa::path(
    delete,
    path = "/api/faturamento/{unit_id}/metas/{goal_id}",
    tag = "Metas",
    params(
        ("unit_id" = String, Path, description = "Id da unidade"),
        ("goal_id" = Uuid, Path, description = "Id da meta")
    ),
    responses(
        (status = 204, description = "Meta removida"),
        (status = 404, description = "Meta não encontrada")
    )
)]
pub async fn delete_goal(
    State(app_state): State<AppState>,
    path: Result<Path<(String, Uuid)>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path((unit_id, goal_id)) = path?;
    let unit: Unit = unit_id.parse()?;
    app_state.goal_service.delete(unit, goal_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// GET /api/faturamento/{unit_id}/metas/{goal_id}/remuneracao
#[utoipa::path(
    get,
    path = "/api/faturamento/{unit_id}/metas/{goal_id}/remuneracao",
    tag = "Metas",
    params(
        ("unit_id" = String, Path, description = "Id da unidade"),
        ("goal_id" = Uuid, Path, description = "Id da meta")
    ),
    responses(
        (status = 200, description = "Total vendido e remuneração da meta", body = RewardSummary),
        (status = 404, description = "Meta não encontrada")
    )
)]
pub async fn get_goal_reward(
    State(app_state): State<AppState>,
    path: Result<Path<(String, Uuid)>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path((unit_id, goal_id)) = path?;
    let unit: Unit = unit_id.parse()?;
    let summary = app_state.goal_service.reward_for(unit, goal_id).await?;
    Ok((StatusCode::OK, Json(summary)))
}
