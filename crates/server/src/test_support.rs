//! In-memory collaborators for handler and pipeline tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ragbasic_ingest::embedding::{Embedder, EmbeddingError};
use ragbasic_llm::{CompletionOptions, LlmError, LlmProvider, Message};

use crate::vector_store::{PointId, QdrantPoint, SearchHit, VectorStore, VectorStoreError};

pub struct FakeEmbedder {
    pub calls: AtomicUsize,
    dims: usize,
}

impl FakeEmbedder {
    pub fn new(dims: usize) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            dims,
        }
    }
}

#[async_trait]
impl Embedder for FakeEmbedder {
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts
            .iter()
            .map(|t| {
                let mut v = vec![0.0; self.dims];
                v[0] = t.len() as f32;
                v
            })
            .collect())
    }

    fn dimensions(&self) -> usize {
        self.dims
    }
}

/// Keeps points in insertion order; search returns the first `limit`.
#[derive(Default)]
pub struct MemoryStore {
    points: Mutex<Vec<QdrantPoint>>,
    pub upsert_calls: AtomicUsize,
}

impl MemoryStore {
    pub fn len(&self) -> usize {
        self.points.lock().unwrap().len()
    }

    pub fn points(&self) -> Vec<QdrantPoint> {
        self.points.lock().unwrap().clone()
    }
}

#[async_trait]
impl VectorStore for MemoryStore {
    async fn ensure_collection(&self, _dimensions: usize) -> Result<(), VectorStoreError> {
        Ok(())
    }

    async fn upsert(&self, points: Vec<QdrantPoint>) -> Result<usize, VectorStoreError> {
        self.upsert_calls.fetch_add(1, Ordering::SeqCst);
        let count = points.len();
        self.points.lock().unwrap().extend(points);
        Ok(count)
    }

    async fn search(&self, _vector: Vec<f32>, limit: usize) -> Result<Vec<SearchHit>, VectorStoreError> {
        Ok(self
            .points
            .lock()
            .unwrap()
            .iter()
            .take(limit)
            .map(|p| SearchHit {
                id: PointId::Uuid(p.id),
                score: 1.0,
                payload: p.payload.clone(),
            })
            .collect())
    }
}

pub struct FakeProvider {
    pub calls: Arc<AtomicUsize>,
    /// User message of every completion request.
    pub prompts: Arc<Mutex<Vec<String>>>,
    reply: String,
}

impl FakeProvider {
    pub fn new(reply: &str) -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            prompts: Arc::new(Mutex::new(Vec::new())),
            reply: reply.to_string(),
        }
    }
}

#[async_trait]
impl LlmProvider for FakeProvider {
    async fn complete(&self, messages: &[Message], _options: CompletionOptions) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(last) = messages.last() {
            self.prompts.lock().unwrap().push(last.content.clone());
        }
        Ok(self.reply.clone())
    }
}
