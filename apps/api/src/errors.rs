use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::{LlmError, ProviderErrorKind};
use crate::prompts::PromptError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Prompt management error: {0}")]
    Prompt(#[from] PromptError),

    #[error("AI service error: {0}")]
    Llm(#[from] LlmError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),

            AppError::Prompt(e) => match e {
                PromptError::Io(io) => {
                    tracing::error!("Prompt storage error: {io}");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "PROMPT_STORAGE_ERROR",
                        "Failed to persist prompt changes".to_string(),
                    )
                }
                other => (
                    StatusCode::BAD_REQUEST,
                    "PROMPT_ERROR",
                    format!("Prompt management error: {other}"),
                ),
            },

            AppError::Llm(e) => {
                tracing::error!("AI service error: {e}");
                match e.kind() {
                    ProviderErrorKind::RateLimited => (
                        StatusCode::TOO_MANY_REQUESTS,
                        "RATE_LIMITED",
                        "AI service rate limit exceeded. Please try again later.".to_string(),
                    ),
                    ProviderErrorKind::Unauthorized => (
                        StatusCode::UNAUTHORIZED,
                        "UNAUTHORIZED",
                        "Invalid API key. Please check your configuration.".to_string(),
                    ),
                    ProviderErrorKind::Forbidden => (
                        StatusCode::FORBIDDEN,
                        "FORBIDDEN",
                        "Access denied. Please check your API permissions.".to_string(),
                    ),
                    ProviderErrorKind::NotFound => (
                        StatusCode::NOT_FOUND,
                        "NOT_FOUND",
                        "AI service endpoint not found.".to_string(),
                    ),
                    ProviderErrorKind::InvalidRequest | ProviderErrorKind::Upstream => {
                        let message = match e {
                            LlmError::Provider { status, .. } if *status >= 500 => {
                                "AI service is temporarily unavailable. Please try again later."
                                    .to_string()
                            }
                            other => format!("AI service error: {other}"),
                        };
                        (StatusCode::BAD_GATEWAY, "AI_SERVICE_ERROR", message)
                    }
                }
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
