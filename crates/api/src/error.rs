use aroundme_core::ServiceError;
use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// API error type that maps to the `{"error", "message"}` JSON envelope.
///
/// Every domain error (validation, missing content, like conflicts) is a
/// 400. Missing content stays a 400 rather than a 404 for compatibility with
/// existing clients.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    PayloadTooLarge(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return ApiError::PayloadTooLarge(rejection.body_text());
        }
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            ApiError::Service(err) if err.is_client_error() => {
                tracing::warn!("Invalid request: {err}");
                (StatusCode::BAD_REQUEST, "Invalid Request", err.to_string())
            }
            ApiError::Service(err) => {
                tracing::error!("Storage error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    "An internal error occurred".to_string(),
                )
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!("Invalid request: {msg}");
                (StatusCode::BAD_REQUEST, "Invalid Request", msg.clone())
            }
            ApiError::PayloadTooLarge(msg) => {
                tracing::warn!("Request body too large: {msg}");
                (StatusCode::PAYLOAD_TOO_LARGE, "Payload Too Large", msg.clone())
            }
        };

        let body = json!({
            "error": error,
            "message": message,
        });

        (status, Json(body)).into_response()
    }
}

/// Convenience type alias for route handlers.
pub type ApiResult<T> = Result<T, ApiError>;
