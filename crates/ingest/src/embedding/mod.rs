pub mod batcher;
pub mod ollama;
pub mod openai;
pub mod traits;

use std::sync::Arc;

use ragbasic_core::config::{EmbeddingConfig, LlmConfig, OllamaConfig};

pub use batcher::{embed_chunks, EmbeddedChunk, EmbeddingBatcher};
pub use ollama::OllamaEmbedder;
pub use openai::OpenAiEmbedder;
pub use traits::{Embedder, EmbeddingError};

/// Create the embedding backend named by `EMBEDDING_PROVIDER`.
pub fn create_embedder(
    embedding: &EmbeddingConfig,
    ollama: &OllamaConfig,
    llm: &LlmConfig,
) -> Result<Arc<dyn Embedder>, EmbeddingError> {
    let dimensions = embedding.dimensions as usize;
    match embedding.provider.as_str() {
        "ollama" => Ok(Arc::new(OllamaEmbedder::new(
            ollama.url.clone(),
            ollama.embedding_model.clone(),
            dimensions,
        ))),
        "openai" => {
            let api_key = llm
                .openai_api_key
                .as_ref()
                .ok_or_else(|| EmbeddingError::NotConfigured("OPENAI_API_KEY not set".into()))?;
            Ok(Arc::new(OpenAiEmbedder::new(
                api_key.clone(),
                llm.openai_embedding_model.clone(),
                llm.openai_base_url.clone(),
                dimensions,
            )))
        }
        other => Err(EmbeddingError::NotConfigured(format!(
            "unknown embedding provider: '{}'",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ragbasic_core::Config;

    #[test]
    fn creates_configured_provider() {
        let config = Config::for_profile("EMBTEST_OLLAMA");
        let embedder = create_embedder(&config.embedding, &config.ollama, &config.llm).unwrap();
        assert_eq!(embedder.dimensions(), config.embedding.dimensions as usize);
    }

    #[test]
    fn openai_without_key_is_not_configured() {
        let mut config = Config::for_profile("EMBTEST_OPENAI");
        config.embedding.provider = "openai".to_string();
        config.llm.openai_api_key = None;
        let result = create_embedder(&config.embedding, &config.ollama, &config.llm);
        assert!(matches!(result, Err(EmbeddingError::NotConfigured(_))));
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let mut config = Config::for_profile("EMBTEST_UNKNOWN");
        config.embedding.provider = "onnx".to_string();
        assert!(create_embedder(&config.embedding, &config.ollama, &config.llm).is_err());
    }
}
