//! API request handlers

use super::{requests::*, responses::ErrorResponse, ApiState};
use crate::error::EngineError;
use crate::models::Share;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

/// Create a new index from validated members
pub async fn create_index(
    State(state): State<ApiState>,
    Json(request): Json<CreateIndexRequest>,
) -> Response {
    if let Err(message) = request.validate_payload() {
        return validation_error(message);
    }

    let shares = request
        .index_members
        .into_iter()
        .map(|m| Share::new(m.share_name, m.share_price, m.number_of_shares))
        .collect();

    if state.engine.create_index(&request.index_name, shares) {
        StatusCode::CREATED.into_response()
    } else {
        error_response(
            StatusCode::CONFLICT,
            format!("index already exists: {}", request.index_name),
        )
    }
}

/// Apply one adjustment operation: addition, deletion or dividend
pub async fn adjust_index(
    State(state): State<ApiState>,
    Json(request): Json<IndexAdjustmentRequest>,
) -> Response {
    if let Some(addition) = request.addition_operation {
        if let Err(message) = addition.validate_payload() {
            return validation_error(message);
        }
        let share = Share::new(
            addition.share_name,
            addition.share_price,
            addition.number_of_shares,
        );
        return match state.engine.add_share(&addition.index_name, share) {
            Ok(true) => StatusCode::CREATED.into_response(),
            Ok(false) => StatusCode::ACCEPTED.into_response(),
            Err(err) => engine_error(err),
        };
    }

    if let Some(deletion) = request.deletion_operation {
        if let Err(message) = deletion.validate_payload() {
            return validation_error(message);
        }
        return match state
            .engine
            .remove_share(&deletion.index_name, &deletion.share_name)
        {
            Ok(()) => StatusCode::OK.into_response(),
            Err(err) => engine_error(err),
        };
    }

    if let Some(dividend) = request.dividend_operation {
        if let Err(message) = dividend.validate_payload() {
            return validation_error(message);
        }
        return match state
            .engine
            .apply_dividend(&dividend.share_name, dividend.dividend)
        {
            Ok(()) => StatusCode::OK.into_response(),
            Err(err) => engine_error(err),
        };
    }

    validation_error("adjustment request must contain an operation".to_string())
}

/// List the state of all indices
pub async fn list_index_states(State(state): State<ApiState>) -> Response {
    let response = super::IndexListResponse {
        index_details: state.engine.all_index_states(),
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// Get the state of one index by name
pub async fn get_index_state(
    State(state): State<ApiState>,
    Path(index_name): Path<String>,
) -> Response {
    match state.engine.index_state(&index_name) {
        Ok(snapshot) => (StatusCode::OK, Json(snapshot)).into_response(),
        Err(err) => engine_error(err),
    }
}

/// Map a typed engine failure to its HTTP status
fn engine_error(err: EngineError) -> Response {
    let status = match &err {
        EngineError::IndexNotFound(_) | EngineError::ShareNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        EngineError::PreconditionFailed(_) => StatusCode::CONFLICT,
    };
    error_response(status, err.to_string())
}

fn validation_error(message: String) -> Response {
    error_response(StatusCode::BAD_REQUEST, message)
}

fn error_response(status: StatusCode, error: String) -> Response {
    let body = ErrorResponse {
        error,
        code: status.as_u16(),
        timestamp: chrono::Utc::now().timestamp(),
    };
    (status, Json(body)).into_response()
}
