//! Server startup: collaborator wiring and shared state initialization.

use std::sync::Arc;

use ragbasic_core::Config;
use ragbasic_ingest::embedding::create_embedder;
use ragbasic_llm::AnswerGenerator;
use tracing::{info, warn};

use crate::rag::RagService;
use crate::state::AppState;
use crate::vector_store::{QdrantStore, VectorStore};

/// Build `AppState` from config.
///
/// A missing or unreachable collaborator only disables the routes that need
/// it; extraction and chunking always work.
pub async fn build_app_state(config: Config) -> Arc<AppState> {
    let answerer = match AnswerGenerator::from_config(&config.llm, &config.ollama) {
        Ok(generator) => {
            info!("Answer generator ready (provider: {})", config.llm.provider);
            Some(generator)
        }
        Err(e) => {
            warn!("Answer generator not available: {} — GET /rag/answer will be disabled", e);
            None
        }
    };

    let rag = match create_embedder(&config.embedding, &config.ollama, &config.llm) {
        Ok(embedder) => {
            let store = QdrantStore::new(&config.qdrant);
            if let Err(e) = store.ensure_collection(embedder.dimensions()).await {
                warn!(
                    "Could not verify Qdrant collection '{}': {} — ingest and query will fail until Qdrant is reachable",
                    store.collection(),
                    e
                );
            }
            info!("Embedding provider ready ({})", config.embedding.provider);
            Some(RagService::new(
                embedder,
                Arc::new(store),
                answerer,
                config.embedding.batch_size as usize,
                config.llm.top_k as usize,
            ))
        }
        Err(e) => {
            warn!("Embedding provider not available: {} — retrieval routes will be disabled", e);
            None
        }
    };

    Arc::new(AppState { config, rag })
}
