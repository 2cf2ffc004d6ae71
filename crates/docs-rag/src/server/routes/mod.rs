//! API routes for the answer service

pub mod query;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::error::{Error, Result};
use crate::server::state::AppState;

/// Build all routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/query", post(query::answer_query))
}

/// Root status endpoint
async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok", "message": "RAG API running" }))
}

/// Health check: verifies the vector store is reachable
async fn health(State(state): State<AppState>) -> Result<Json<serde_json::Value>> {
    if state.store().health_check().await? {
        Ok(Json(serde_json::json!({ "status": "healthy" })))
    } else {
        Err(Error::StoreUnavailable(
            "vector store health check failed".to_string(),
        ))
    }
}
