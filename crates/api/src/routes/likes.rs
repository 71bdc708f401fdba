use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::error::ApiResult;
use crate::state::AppState;

/// Like routes. The request body is the bare user id, e.g. `100`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/contents/{content_id}/like",
            get(like_count).post(like_content).delete(unlike_content),
        )
        .route(
            "/contents/{content_id}/likes",
            get(like_count).post(like_content).delete(unlike_content),
        )
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LikeCount {
    content_id: i64,
    like_count: i64,
}

async fn like_content(
    State(state): State<AppState>,
    content_id: Result<Path<i64>, PathRejection>,
    user_id: Result<Json<i64>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Path(content_id) = content_id?;
    let Json(user_id) = user_id?;
    state.likes().like(content_id, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn unlike_content(
    State(state): State<AppState>,
    content_id: Result<Path<i64>, PathRejection>,
    user_id: Result<Json<i64>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Path(content_id) = content_id?;
    let Json(user_id) = user_id?;
    state.likes().unlike(content_id, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn like_count(
    State(state): State<AppState>,
    content_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<LikeCount>> {
    let Path(content_id) = content_id?;
    let like_count = state.likes().count(content_id).await?;
    Ok(Json(LikeCount {
        content_id,
        like_count,
    }))
}
