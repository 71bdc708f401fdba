pub mod contents;
pub mod health;
pub mod likes;

use axum::{middleware::map_response, Router};

use crate::middleware::body_limit::{body_limit_layer, envelope_oversized_body};
use crate::state::AppState;

/// Assemble the full router with all route groups.
pub fn build_router(state: AppState) -> Router {
    let max_body_bytes = state.config().max_body_bytes;

    Router::new()
        .merge(health::routes())
        .merge(contents::routes())
        .merge(likes::routes())
        .layer(body_limit_layer(max_body_bytes))
        .layer(map_response(envelope_oversized_body))
        .with_state(state)
}
