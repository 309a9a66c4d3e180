use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub retrieval_ready: bool,
    pub answer_ready: bool,
    pub collection: String,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        retrieval_ready: state.rag.is_some(),
        answer_ready: state.rag.as_ref().is_some_and(|r| r.can_answer()),
        collection: state.config.qdrant.collection.clone(),
    })
}

/// Redacted view of the loaded configuration.
pub async fn config(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(state.config.redacted_summary())
}
