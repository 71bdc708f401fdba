use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tower_http::limit::RequestBodyLimitLayer;

use crate::error::ApiError;

/// Reject request bodies larger than `max_bytes` with 413.
pub fn body_limit_layer(max_bytes: usize) -> RequestBodyLimitLayer {
    RequestBodyLimitLayer::new(max_bytes)
}

/// Rewrite the limit layer's plain-text 413 into the JSON error envelope.
///
/// Requests announcing an oversized `Content-Length` are refused before any
/// extractor runs, so the envelope has to be applied here.
pub async fn envelope_oversized_body(response: Response) -> Response {
    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"));

    if response.status() == StatusCode::PAYLOAD_TOO_LARGE && !is_json {
        return ApiError::PayloadTooLarge("length limit exceeded".to_string()).into_response();
    }
    response
}
