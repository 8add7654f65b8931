// src/common/error.rs

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Erros que abortam uma chamada inteira. Falhas de linha da planilha
// ficam em `services::row_normalizer::RowError` e só viram estatística.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unidade inválida: {0}")]
    InvalidUnit(String),

    #[error("Arquivo inválido: {0}")]
    InvalidFile(String),

    #[error("Planilha sem abas")]
    EmptySheet,

    #[error("Planilha sem linhas de dados")]
    NoData,

    #[error("Nenhuma linha com data válida")]
    NoValidRows,

    #[error("Requisição inválida: {0}")]
    InvalidInput(String),

    #[error("Arquivo acima do tamanho máximo")]
    PayloadTooLarge,

    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Meta não encontrada")]
    GoalNotFound,

    // Falha ao gravar o lote de documentos (commit)
    #[error("Falha de persistência: {0}")]
    PersistenceError(String),

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Documento com formato inesperado: {0}")]
    SerializationError(#[from] serde_json::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidUnit(_)
            | AppError::InvalidFile(_)
            | AppError::EmptySheet
            | AppError::NoData
            | AppError::InvalidInput(_)
            | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NoValidRows => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::GoalNotFound => StatusCode::NOT_FOUND,
            AppError::PersistenceError(_)
            | AppError::DatabaseError(_)
            | AppError::SerializationError(_)
            | AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Mensagem exibida ao usuário. Detalhes internos ficam só no log.
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidUnit(unit) => format!("Unidade '{}' não é válida.", unit),
            AppError::InvalidFile(_) => {
                "Não foi possível ler o arquivo. Envie uma planilha válida (xlsx, xls, ods ou csv).".to_string()
            }
            AppError::EmptySheet => "A planilha enviada não possui nenhuma aba.".to_string(),
            AppError::NoData => "A planilha enviada não possui linhas de dados.".to_string(),
            AppError::NoValidRows => {
                "Nenhuma linha da planilha possui uma data de venda válida (DD/MM/AAAA).".to_string()
            }
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::PayloadTooLarge => "O arquivo excede o tamanho máximo permitido.".to_string(),
            AppError::ValidationError(_) => "Um ou mais campos são inválidos.".to_string(),
            AppError::GoalNotFound => "Meta não encontrada.".to_string(),
            AppError::PersistenceError(_) => {
                "Falha ao salvar os dados. Nenhuma alteração foi gravada.".to_string()
            }
            _ => "Ocorreu um erro inesperado.".to_string(),
        }
    }
}

// Rejeições dos extratores do axum saem no mesmo formato dos demais erros
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(format!("Corpo JSON inválido: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::InvalidInput(format!("Parâmetro de rota inválido: {}", rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if let AppError::ValidationError(errors) = &self {
            let mut details = std::collections::HashMap::new();
            for (field, field_errors) in errors.field_errors() {
                let messages: Vec<String> = field_errors
                    .iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .collect();
                details.insert(field.to_string(), messages);
            }
            let body = Json(json!({
                "success": false,
                "error": self.user_message(),
                "details": details,
            }));
            return (status, body).into_response();
        }

        if status.is_server_error() {
            tracing::error!("Erro Interno do Servidor: {:?}", self);
        }

        let body = Json(json!({ "success": false, "error": self.user_message() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_problems_map_to_client_errors() {
        assert_eq!(AppError::InvalidUnit("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::EmptySheet.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NoData.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NoValidRows.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(AppError::GoalNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::PayloadTooLarge.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn persistence_failure_hides_internal_detail() {
        let err = AppError::PersistenceError("connection reset by peer".into());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.user_message().contains("connection reset"));
    }

    #[test]
    fn each_file_error_has_its_own_message() {
        let messages = [
            AppError::InvalidFile("zip".into()).user_message(),
            AppError::EmptySheet.user_message(),
            AppError::NoData.user_message(),
            AppError::NoValidRows.user_message(),
        ];
        for (i, a) in messages.iter().enumerate() {
            for b in messages.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
