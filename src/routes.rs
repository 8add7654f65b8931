// src/routes.rs

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers};

pub fn build_router(app_state: AppState) -> Router {
    // O limite de tamanho vale só para a importação
    let upload = post(handlers::uploads::upload_sales)
        .layer(DefaultBodyLimit::max(app_state.settings.max_upload_bytes));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        // Importação e leitura das vendas
        .route("/api/faturamento/upload", upload)
        .route(
            "/api/faturamento/{unit_id}/periodos/{period}/dias",
            get(handlers::sales::list_month_days),
        )
        .route(
            "/api/faturamento/{unit_id}/periodos/{period}/responsaveis",
            get(handlers::sales::list_responsible_totals),
        )
        // Metas
        .route(
            "/api/faturamento/{unit_id}/metas",
            post(handlers::goals::create_goal).get(handlers::goals::list_goals),
        )
        .route(
            "/api/faturamento/{unit_id}/metas/{goal_id}",
            put(handlers::goals::update_goal).delete(handlers::goals::delete_goal),
        )
        .route(
            "/api/faturamento/{unit_id}/metas/{goal_id}/remuneracao",
            get(handlers::goals::get_goal_reward),
        )
        // Premiação
        .route(
            "/api/faturamento/{unit_id}/premiacao",
            get(handlers::rewards::get_bands).put(handlers::rewards::update_bands),
        )
        .route(
            "/api/faturamento/{unit_id}/premiacao/padrao",
            post(handlers::rewards::reset_bands),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state)
}
