use aroundme_core::content::{ContentDetail, ContentInput, ContentSummary};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::state::AppState;

/// Content CRUD, search and filter routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/contents", get(list_contents).post(create_content))
        .route("/contents/search", get(search_contents))
        .route("/contents/filter/category", get(filter_by_category))
        .route("/contents/filter/date", get(filter_by_created_time))
        .route(
            "/contents/{content_id}",
            get(get_content).patch(update_content).delete(delete_content),
        )
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    query: String,
}

#[derive(Debug, Deserialize)]
struct CategoryParams {
    category: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DateParams {
    start_date: Option<String>,
    end_date: Option<String>,
}

async fn list_contents(State(state): State<AppState>) -> ApiResult<Json<Vec<ContentSummary>>> {
    Ok(Json(state.contents().list().await?))
}

async fn create_content(
    State(state): State<AppState>,
    payload: Result<Json<ContentInput>, JsonRejection>,
) -> ApiResult<Json<ContentDetail>> {
    let Json(input) = payload?;
    Ok(Json(state.contents().create(input).await?))
}

async fn get_content(
    State(state): State<AppState>,
    content_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<ContentDetail>> {
    let Path(content_id) = content_id?;
    Ok(Json(state.contents().detail(content_id).await?))
}

async fn update_content(
    State(state): State<AppState>,
    content_id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ContentInput>, JsonRejection>,
) -> ApiResult<Json<ContentDetail>> {
    let Path(content_id) = content_id?;
    let Json(input) = payload?;
    Ok(Json(state.contents().update(content_id, input).await?))
}

async fn delete_content(
    State(state): State<AppState>,
    content_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(content_id) = content_id?;
    state.contents().delete(content_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn search_contents(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> ApiResult<Json<Vec<ContentSummary>>> {
    let Query(params) = params?;
    Ok(Json(state.contents().search(&params.query).await?))
}

async fn filter_by_category(
    State(state): State<AppState>,
    params: Result<Query<CategoryParams>, QueryRejection>,
) -> ApiResult<Json<Vec<ContentSummary>>> {
    let Query(params) = params?;
    Ok(Json(
        state.contents().filter_by_category(&params.category).await?,
    ))
}

async fn filter_by_created_time(
    State(state): State<AppState>,
    params: Result<Query<DateParams>, QueryRejection>,
) -> ApiResult<Json<Vec<ContentSummary>>> {
    let Query(params) = params?;
    let contents = state
        .contents()
        .filter_by_created_time(params.start_date.as_deref(), params.end_date.as_deref())
        .await?;
    Ok(Json(contents))
}
