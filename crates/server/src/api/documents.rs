//! Document upload endpoints: extract + chunk, and the full ingest pipeline.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use axum::Json;
use ragbasic_core::config::ChunkingConfig;
use ragbasic_ingest::document::chunker::{chunk_text_by_sentences, ChunkConfig, DocumentChunk};
use ragbasic_ingest::document::extract_text;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use super::{rag_error, require_rag, ApiError};
use crate::rag::IngestSummary;
use crate::state::AppState;

// ── Request types ─────────────────────────────────

/// Query string shared by both upload routes. Missing values fall back to
/// the configured chunking defaults and a fresh document id.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkParams {
    pub chunk_size: Option<i64>,
    pub overlap: Option<i64>,
    pub doc_id: Option<String>,
}

impl ChunkParams {
    fn resolve(&self, defaults: &ChunkingConfig) -> Result<(ChunkConfig, String), ApiError> {
        let config = ChunkConfig::new(
            self.chunk_size.unwrap_or(defaults.chunk_size),
            self.overlap.unwrap_or(defaults.overlap),
        )
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
        let doc_id = self
            .doc_id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        Ok((config, doc_id))
    }
}

/// Pull the `file` field out of a multipart body.
async fn read_upload(multipart: &mut Multipart) -> Result<(String, Bytes), ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Multipart error: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or("unnamed").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| (StatusCode::BAD_REQUEST, format!("Failed to read file: {e}")))?;
        return Ok((filename, bytes));
    }
    Err((StatusCode::BAD_REQUEST, "No file provided".to_string()))
}

// ── POST /documents/extract ───────────────────────

pub async fn extract(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ChunkParams>,
    mut multipart: Multipart,
) -> Result<Json<Vec<DocumentChunk>>, ApiError> {
    let (config, doc_id) = params.resolve(&state.config.chunking)?;
    let (filename, bytes) = read_upload(&mut multipart).await?;

    let doc = extract_text(&bytes, &filename)
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Text extraction failed: {e}")))?;
    let chunks = chunk_text_by_sentences(&doc.text, &config, &doc_id);

    info!(
        "Chunked '{}' ({} chars) into {} chunks (size={}, overlap={})",
        filename,
        doc.char_count(),
        chunks.len(),
        config.chunk_size(),
        config.overlap()
    );
    Ok(Json(chunks))
}

// ── POST /documents/ingest ────────────────────────

pub async fn ingest(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ChunkParams>,
    mut multipart: Multipart,
) -> Result<Json<IngestSummary>, ApiError> {
    let rag = require_rag(&state)?;
    let (config, doc_id) = params.resolve(&state.config.chunking)?;
    let (filename, bytes) = read_upload(&mut multipart).await?;

    let summary = rag
        .process_and_store_document(&bytes, &filename, &config, &doc_id)
        .await
        .map_err(rag_error)?;
    Ok(Json(summary))
}
