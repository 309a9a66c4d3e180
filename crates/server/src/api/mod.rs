//! HTTP endpoint handlers.
//!
//! Handlers return `(StatusCode, String)` on failure; pipeline errors are
//! mapped to a status here.

mod documents;
mod health;
mod rag;

use axum::http::StatusCode;

use crate::rag::{RagError, RagService};
use crate::state::AppState;

pub use documents::{extract, ingest};
pub use health::{config, health};
pub use rag::{answer, query};

pub(crate) type ApiError = (StatusCode, String);

fn require_rag(state: &AppState) -> Result<&RagService, ApiError> {
    state.rag.as_ref().ok_or((
        StatusCode::SERVICE_UNAVAILABLE,
        "Embedding provider not configured".to_string(),
    ))
}

fn rag_error(e: RagError) -> ApiError {
    let status = match &e {
        RagError::Extraction(_) | RagError::Chunk(_) | RagError::EmptyDocument(_) => StatusCode::BAD_REQUEST,
        RagError::Embedding(_) | RagError::VectorStore(_) | RagError::Llm(_) => StatusCode::BAD_GATEWAY,
        RagError::AnswerUnavailable => StatusCode::SERVICE_UNAVAILABLE,
    };
    if status.is_server_error() {
        tracing::error!("Request failed: {}", e);
    }
    (status, e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ragbasic_ingest::document::chunker::ChunkError;

    #[test]
    fn client_errors_map_to_bad_request() {
        let (status, body) = rag_error(RagError::Chunk(ChunkError::InvalidArgument("chunk_size must be positive".into())));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("chunk_size"));
        assert_eq!(rag_error(RagError::EmptyDocument("a.txt".into())).0, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_answerer_is_unavailable() {
        assert_eq!(rag_error(RagError::AnswerUnavailable).0, StatusCode::SERVICE_UNAVAILABLE);
    }
}
