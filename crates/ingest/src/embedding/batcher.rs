use std::sync::Arc;

use tracing::info;

use crate::document::chunker::DocumentChunk;

use super::traits::{Embedder, EmbeddingError};

/// A chunk together with its embedding vector.
#[derive(Debug, Clone)]
pub struct EmbeddedChunk {
    pub chunk: DocumentChunk,
    pub vector: Vec<f32>,
}

/// Collects chunks and embeds them in one backend call when the batch is full.
pub struct EmbeddingBatcher {
    buffer: Vec<DocumentChunk>,
    batch_size: usize,
    embedder: Arc<dyn Embedder>,
}

impl EmbeddingBatcher {
    pub fn new(embedder: Arc<dyn Embedder>, batch_size: usize) -> Self {
        let batch_size = batch_size.max(1);
        Self {
            buffer: Vec::with_capacity(batch_size),
            batch_size,
            embedder,
        }
    }

    /// Add a chunk to the batch. Returns embeddings if the batch is full (auto-flush).
    pub async fn add(
        &mut self,
        chunk: DocumentChunk,
    ) -> Result<Option<Vec<EmbeddedChunk>>, EmbeddingError> {
        self.buffer.push(chunk);
        if self.buffer.len() >= self.batch_size {
            Ok(Some(self.flush().await?))
        } else {
            Ok(None)
        }
    }

    /// Force-flush remaining items.
    pub async fn flush(&mut self) -> Result<Vec<EmbeddedChunk>, EmbeddingError> {
        if self.buffer.is_empty() {
            return Ok(Vec::new());
        }
        let batch: Vec<DocumentChunk> = self.buffer.drain(..).collect();
        let texts: Vec<&str> = batch.iter().map(|c| c.text.as_str()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;
        if embeddings.len() != batch.len() {
            return Err(EmbeddingError::CountMismatch {
                sent: batch.len(),
                received: embeddings.len(),
            });
        }

        Ok(batch
            .into_iter()
            .zip(embeddings)
            .map(|(chunk, vector)| EmbeddedChunk { chunk, vector })
            .collect())
    }

    /// Number of items currently buffered.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}

/// Embed every chunk of a document, `batch_size` texts per backend call.
/// Output order matches input order.
pub async fn embed_chunks(
    embedder: Arc<dyn Embedder>,
    chunks: Vec<DocumentChunk>,
    batch_size: usize,
) -> Result<Vec<EmbeddedChunk>, EmbeddingError> {
    let total = chunks.len();
    let mut batcher = EmbeddingBatcher::new(embedder, batch_size);
    let mut embedded = Vec::with_capacity(total);

    for chunk in chunks {
        if let Some(batch) = batcher.add(chunk).await? {
            embedded.extend(batch);
            info!("Embedded {}/{} chunks", embedded.len(), total);
        }
    }
    embedded.extend(batcher.flush().await?);

    Ok(embedded)
}
