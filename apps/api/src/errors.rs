use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Text shown to a person in the chat transcript when generation fails.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Llm(msg) => format!("AI Generation Error: {msg}"),
            AppError::Network(msg) => {
                format!("Network Error: {msg}. Please check your connection and try again.")
            }
            AppError::Validation(msg) => format!("Validation Error: {msg}"),
            AppError::Configuration(msg) | AppError::NotFound(msg) => msg.clone(),
            AppError::Database(_) | AppError::Internal(_) => {
                "An unexpected error occurred. Please try again.".to_string()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CONFIGURATION_ERROR",
                    msg.clone(),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::Network(msg) => {
                tracing::error!("Network error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "NETWORK_ERROR",
                    "Failed to connect to AI service".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefixes() {
        assert_eq!(
            AppError::Llm("model refused".to_string()).user_message(),
            "AI Generation Error: model refused"
        );
        assert!(AppError::Network("timeout".to_string())
            .user_message()
            .ends_with("Please check your connection and try again."));
        assert_eq!(
            AppError::Validation("too short".to_string()).user_message(),
            "Validation Error: too short"
        );
    }

    #[test]
    fn test_internal_details_are_not_shown_to_users() {
        let err = AppError::Internal(anyhow::anyhow!("pool exhausted"));
        assert!(!err.user_message().contains("pool"));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::NotFound("x".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Validation("x".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Llm("x".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
