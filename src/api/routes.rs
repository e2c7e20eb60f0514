//! API route definitions

use super::{handlers::*, ApiState};
use axum::{
    routing::{get, post},
    Router,
};

/// Routes for index creation and adjustment
pub fn create_index_routes() -> Router<ApiState> {
    Router::new()
        .route("/api/create", post(create_index))
        .route("/api/indexAdjustment", post(adjust_index))
}

/// Routes for index state queries
pub fn create_state_routes() -> Router<ApiState> {
    Router::new()
        .route("/api/indexState", get(list_index_states))
        .route("/api/indexState/:indexName", get(get_index_state))
}
