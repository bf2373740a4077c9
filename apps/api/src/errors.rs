use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::generation::ModelError;
use crate::store::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// Missing or unusable user input. No request is sent to the model.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The operation is already in flight for this session.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Generation failed: {0}")]
    Generation(ModelError),

    #[error("Job match analysis failed: {0}")]
    Analysis(ModelError),

    #[error("Speech synthesis failed: {0}")]
    Speech(ModelError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] StoreError),

    /// A browser capability (speech playback, dictation) is switched off.
    #[error("Capability unavailable: {0}")]
    Unavailable(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            // Provider messages are surfaced verbatim so the user knows what to fix.
            AppError::Generation(e) => {
                tracing::error!("Generation error: {e}");
                (StatusCode::BAD_GATEWAY, "GENERATION_ERROR", e.to_string())
            }
            AppError::Analysis(e) => {
                tracing::error!("Analysis error: {e}");
                (StatusCode::BAD_GATEWAY, "ANALYSIS_ERROR", e.to_string())
            }
            AppError::Speech(e) => {
                tracing::error!("Speech error: {e}");
                (StatusCode::BAD_GATEWAY, "SPEECH_ERROR", e.to_string())
            }
            AppError::Persistence(e) => {
                tracing::error!("Persistence error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PERSISTENCE_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
            AppError::Unavailable(msg) => {
                (StatusCode::NOT_IMPLEMENTED, "CAPABILITY_UNAVAILABLE", msg.clone())
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
