//! REST API exposing the index registry

mod handlers;
mod requests;
mod responses;
mod routes;

pub use requests::*;
pub use responses::*;
pub use routes::*;

use crate::config::ApiConfig;
use crate::engine::RebalanceEngine;
use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

/// Start the API server
pub async fn start_server(
    engine: Arc<RebalanceEngine>,
    config: &ApiConfig,
) -> Result<tokio::task::JoinHandle<()>> {
    let app = create_app(engine, config.enable_cors);

    let listener = TcpListener::bind(&config.bind_address).await?;
    info!("API server listening on {}", config.bind_address);

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("API server error: {}", e);
        }
    });

    Ok(handle)
}

/// Create the API application. Public so tests can drive the router without
/// binding a socket.
pub fn create_app(engine: Arc<RebalanceEngine>, enable_cors: bool) -> Router {
    let state = ApiState::new(engine);

    let app = Router::new()
        .merge(create_index_routes())
        .merge(create_state_routes())
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    if enable_cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

/// Health check handler
async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().timestamp(),
        "service": "index-registry"
    }))
}

/// Shared API state
#[derive(Clone)]
pub struct ApiState {
    pub engine: Arc<RebalanceEngine>,
}

impl ApiState {
    pub fn new(engine: Arc<RebalanceEngine>) -> Self {
        Self { engine }
    }
}
