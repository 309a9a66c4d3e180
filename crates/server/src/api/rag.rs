//! Retrieval endpoints: similarity search and grounded answers.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::{rag_error, require_rag, ApiError};
use crate::state::AppState;
use crate::vector_store::SearchHit;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    pub prompt: String,
    /// Zero or missing means the configured default.
    #[serde(default)]
    pub top_k: usize,
}

#[derive(Debug, Deserialize)]
pub struct AnswerParams {
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub question: String,
    pub answer: String,
}

fn require_text(value: &str, name: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, format!("{name} must not be empty")));
    }
    Ok(())
}

// ── POST /rag/query ───────────────────────────────

pub async fn query(
    State(state): State<Arc<AppState>>,
    Json(req): Json<QueryRequest>,
) -> Result<Json<Vec<SearchHit>>, ApiError> {
    let rag = require_rag(&state)?;
    require_text(&req.prompt, "prompt")?;
    let hits = rag.query(&req.prompt, req.top_k).await.map_err(rag_error)?;
    Ok(Json(hits))
}

// ── GET /rag/answer ───────────────────────────────

pub async fn answer(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AnswerParams>,
) -> Result<Json<AnswerResponse>, ApiError> {
    let rag = require_rag(&state)?;
    require_text(&params.question, "question")?;
    let answer = rag.answer(&params.question).await.map_err(rag_error)?;
    Ok(Json(AnswerResponse {
        question: params.question,
        answer,
    }))
}
