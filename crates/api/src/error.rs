use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use execbridge_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Only bridge-level conditions end up here: invalid input and staging
/// failures. Anything that goes wrong while running a script is reported
/// inside a normal `ExecutionResult` instead.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `execbridge_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The multipart body could not be read. Carries its own status, e.g.
    /// 413 when the configured body limit is exceeded.
    #[error("Invalid multipart body: {0}")]
    Multipart(#[from] MultipartError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(CoreError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Core(CoreError::Staging { context, source }) => {
                tracing::error!(error = %source, context = %context, "Failed to stage script");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STAGING_ERROR",
                    (*context).to_string(),
                )
            }
            AppError::Multipart(err) => {
                let status = err.status();
                let code = if status == StatusCode::PAYLOAD_TOO_LARGE {
                    "PAYLOAD_TOO_LARGE"
                } else {
                    "BAD_REQUEST"
                };
                (status, code, err.body_text())
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
