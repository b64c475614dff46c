//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Could not interpret suggestion: {reason}")]
    ParseFailure { reason: String, raw_text: String },

    #[error("AI suggestions unavailable: {0}")]
    SuggestionsUnavailable(String),

    #[error("Schema repair failed: {0}")]
    SchemaRepair(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl AppError {
    /// Código estable que el cliente puede usar para distinguir el tipo de fallo
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Database(_) => "DB_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Duplicate(_) => "DUPLICATE",
            AppError::ParseFailure { .. } => "SUGGESTION_PARSE_FAILED",
            AppError::SuggestionsUnavailable(_) => "AI_DISABLED",
            AppError::SchemaRepair(_) => "SCHEMA_REPAIR_FAILED",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Un duplicado puede tratarse como éxito idempotente por el llamador
    pub fn is_duplicate(&self) -> bool {
        matches!(self, AppError::Duplicate(_))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = Some(self.code().to_string());

        let (status, error_response) = match self {
            AppError::Database(e) => {
                log::error!("❌ Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Database Error".to_string(),
                        message: "An error occurred while accessing the database".to_string(),
                        details: Some(json!({ "sql_error": e.to_string() })),
                        code,
                    },
                )
            }

            AppError::Validation(e) => {
                log::warn!("⚠️ Validation error: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Validation Error".to_string(),
                        message: "The provided data is invalid".to_string(),
                        details: Some(json!(e)),
                        code,
                    },
                )
            }

            AppError::BadRequest(msg) => {
                log::warn!("⚠️ Bad request: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Bad Request".to_string(),
                        message: msg,
                        details: None,
                        code,
                    },
                )
            }

            AppError::NotFound(msg) => {
                log::warn!("🔍 Resource not found: {}", msg);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse {
                        error: "Not Found".to_string(),
                        message: msg,
                        details: None,
                        code,
                    },
                )
            }

            AppError::Duplicate(msg) => {
                log::info!("♻️ Duplicate rejected: {}", msg);
                (
                    StatusCode::CONFLICT,
                    ErrorResponse {
                        error: "Duplicate".to_string(),
                        message: msg,
                        details: None,
                        code,
                    },
                )
            }

            AppError::ParseFailure { reason, raw_text } => {
                log::warn!("🤖 Suggestion could not be parsed: {}", reason);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorResponse {
                        error: "Suggestion Parse Failure".to_string(),
                        message: reason,
                        details: Some(json!({ "raw_text": raw_text })),
                        code,
                    },
                )
            }

            AppError::SuggestionsUnavailable(msg) => {
                log::warn!("🤖 AI suggestions unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorResponse {
                        error: "AI Suggestions Disabled".to_string(),
                        message: msg,
                        details: None,
                        code,
                    },
                )
            }

            AppError::SchemaRepair(msg) => {
                log::error!("🛠️ Schema repair failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Schema Repair Failed".to_string(),
                        message: "The maintenance type table could not be repaired".to_string(),
                        details: Some(json!({ "schema_error": msg })),
                        code,
                    },
                )
            }

            AppError::Internal(msg) => {
                log::error!("❌ Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Internal Server Error".to_string(),
                        message: "An unexpected error occurred".to_string(),
                        details: Some(json!({ "internal_error": msg })),
                        code,
                    },
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de validación
pub fn validation_error(field: &'static str, message: &'static str) -> AppError {
    use validator::ValidationError;

    let mut error = ValidationError::new("custom");
    error.add_param("field".into(), &field);
    error.add_param("message".into(), &message);

    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);

    AppError::Validation(errors)
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: i64) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

/// Función helper para crear errores de duplicado
pub fn duplicate_error(resource: &str, detail: &str) -> AppError {
    AppError::Duplicate(format!("{} already exists: {}", resource, detail))
}

/// Función helper para crear errores de solicitud incorrecta
pub fn bad_request_error(message: &str) -> AppError {
    AppError::BadRequest(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_by_category() {
        let cases = vec![
            (bad_request_error("price must be positive"), StatusCode::BAD_REQUEST),
            (duplicate_error("Mechanic", "Ana / 555"), StatusCode::CONFLICT),
            (
                AppError::ParseFailure {
                    reason: "no number".to_string(),
                    raw_text: "maybe soon".to_string(),
                },
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                AppError::SuggestionsUnavailable("no key".to_string()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (not_found_error("Vehicle", 7), StatusCode::NOT_FOUND),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn test_duplicate_is_distinct_from_validation() {
        assert!(duplicate_error("Observation", "x").is_duplicate());
        assert!(!bad_request_error("x").is_duplicate());
        assert!(!validation_error("price", "must be positive").is_duplicate());
    }
}
