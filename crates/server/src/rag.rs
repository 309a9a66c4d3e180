//! Retrieval pipeline: document ingestion, similarity search, grounded answers.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use ragbasic_ingest::document::chunker::{chunk_text_by_sentences, ChunkConfig, ChunkError};
use ragbasic_ingest::document::{extract_text, ExtractionError};
use ragbasic_ingest::embedding::{embed_chunks, Embedder, EmbeddingError};
use ragbasic_llm::{AnswerGenerator, LlmError};
use serde::Serialize;
use tracing::info;

use crate::vector_store::{QdrantPoint, SearchHit, VectorStore, VectorStoreError};

#[derive(Debug, thiserror::Error)]
pub enum RagError {
    #[error("text extraction failed: {0}")]
    Extraction(#[from] ExtractionError),
    #[error(transparent)]
    Chunk(#[from] ChunkError),
    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),
    #[error("vector store failed: {0}")]
    VectorStore(#[from] VectorStoreError),
    #[error("answer generation failed: {0}")]
    Llm(#[from] LlmError),
    #[error("document '{0}' contains no extractable text")]
    EmptyDocument(String),
    #[error("no LLM provider configured for answers")]
    AnswerUnavailable,
}

/// Result of ingesting one document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestSummary {
    pub doc_id: String,
    pub filename: String,
    pub file_type: String,
    pub char_count: usize,
    pub chunk_count: usize,
    pub stored: usize,
    pub ingested_at: DateTime<Utc>,
}

pub struct RagService {
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn VectorStore>,
    answerer: Option<AnswerGenerator>,
    batch_size: usize,
    top_k: usize,
}

impl RagService {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        store: Arc<dyn VectorStore>,
        answerer: Option<AnswerGenerator>,
        batch_size: usize,
        top_k: usize,
    ) -> Self {
        Self {
            embedder,
            store,
            answerer,
            batch_size: batch_size.max(1),
            top_k: top_k.max(1),
        }
    }

    pub fn can_answer(&self) -> bool {
        self.answerer.is_some()
    }

    /// Extract, chunk, embed and store one uploaded document.
    pub async fn process_and_store_document(
        &self,
        bytes: &[u8],
        filename: &str,
        config: &ChunkConfig,
        doc_id: &str,
    ) -> Result<IngestSummary, RagError> {
        let doc = extract_text(bytes, filename)?;
        if doc.is_empty() {
            return Err(RagError::EmptyDocument(filename.to_string()));
        }
        info!(
            "Extracted '{}' (type={}): {} chars",
            filename,
            doc.file_type,
            doc.char_count()
        );

        let chunks = chunk_text_by_sentences(&doc.text, config, doc_id);
        let chunk_count = chunks.len();

        let embedded = embed_chunks(self.embedder.clone(), chunks, self.batch_size).await?;
        let points: Vec<QdrantPoint> = embedded.into_iter().map(QdrantPoint::from).collect();
        let stored = self.store.upsert(points).await?;

        info!("Ingested '{}' as doc '{}': {} chunks stored", filename, doc_id, stored);

        Ok(IngestSummary {
            doc_id: doc_id.to_string(),
            filename: filename.to_string(),
            file_type: doc.file_type.clone(),
            char_count: doc.char_count(),
            chunk_count,
            stored,
            ingested_at: Utc::now(),
        })
    }

    /// Chunks most similar to `prompt`. A `top_k` of zero means the configured default.
    pub async fn query(&self, prompt: &str, top_k: usize) -> Result<Vec<SearchHit>, RagError> {
        let limit = if top_k == 0 { self.top_k } else { top_k };
        let vector = self.embedder.embed(prompt).await?;
        let hits = self.store.search(vector, limit).await?;
        info!("Query matched {} chunks (limit {})", hits.len(), limit);
        Ok(hits)
    }

    /// Answer `question` from the configured number of retrieved chunks.
    pub async fn answer(&self, question: &str) -> Result<String, RagError> {
        let answerer = self.answerer.as_ref().ok_or(RagError::AnswerUnavailable)?;
        let hits = self.query(question, self.top_k).await?;
        let texts: Vec<&str> = hits.iter().map(|h| h.payload.text.as_str()).collect();
        Ok(answerer.answer(question, &texts).await?)
    }
}
