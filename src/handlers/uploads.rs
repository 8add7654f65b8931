// src/handlers/uploads.rs

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    common::error::AppError,
    config::AppState,
    models::sales::UploadResponse,
};

// Tipos MIME aceitos no campo 'file'
const SPREADSHEET_MIME_TYPES: &[&str] = &[
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet", // xlsx
    "application/vnd.ms-excel",                                          // xls (e csv no Windows)
    "application/vnd.oasis.opendocument.spreadsheet",                    // ods
    "text/csv",
];

fn is_spreadsheet_mime(content_type: &str) -> bool {
    let essence = content_type.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
    SPREADSHEET_MIME_TYPES.contains(&essence.as_str())
}

/// Formulário multipart do upload (apenas para a documentação).
#[derive(Deserialize, ToSchema)]
#[allow(dead_code)]
pub struct UploadForm {
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
    #[serde(rename = "unitId")]
    #[schema(example = "centro")]
    unit_id: String,
}

// POST /api/faturamento/upload
#[utoipa::path(
    post,
    path = "/api/faturamento/upload",
    tag = "Faturamento",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Planilha importada", body = UploadResponse),
        (status = 400, description = "Unidade, arquivo ou requisição inválidos"),
        (status = 413, description = "Arquivo acima do tamanho máximo"),
        (status = 422, description = "Nenhuma linha com data de venda válida"),
        (status = 500, description = "Falha ao gravar; nada foi alterado")
    )
)]
pub async fn upload_sales(
    State(app_state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, AppError> {
    let mut multipart = multipart.map_err(|_| {
        AppError::InvalidInput("Envie os dados como multipart/form-data com os campos 'file' e 'unitId'.".into())
    })?;

    let mut file: Option<Vec<u8>> = None;
    let mut unit_id: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let content_type = field.content_type().unwrap_or("").to_string();
                if !is_spreadsheet_mime(&content_type) {
                    return Err(AppError::InvalidInput(format!(
                        "Tipo de arquivo não suportado ({}). Envie xlsx, xls, ods ou csv.",
                        if content_type.is_empty() { "desconhecido" } else { content_type.as_str() }
                    )));
                }
                file = Some(field.bytes().await.map_err(multipart_error)?.to_vec());
            }
            Some("unitId") => {
                unit_id = Some(field.text().await.map_err(multipart_error)?.trim().to_string());
            }
            // Campos extras são ignorados
            _ => {}
        }
    }

    let file = file.ok_or_else(|| AppError::InvalidInput("O campo 'file' é obrigatório.".into()))?;
    let unit_id = unit_id
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::InvalidInput("O campo 'unitId' é obrigatório.".into()))?;

    let stats = app_state.ingestion_service.ingest(&file, &unit_id).await?;

    Ok((StatusCode::OK, Json(UploadResponse::from(stats))))
}

fn multipart_error(e: axum::extract::multipart::MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge;
    }
    AppError::InvalidInput(format!("Falha ao ler o formulário: {}", e.body_text()))
}
