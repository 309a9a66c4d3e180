//! Qdrant-backed storage for chunk embeddings.
//!
//! Talks to the Qdrant REST API directly: one collection holds every chunk,
//! keyed by chunk id, with the chunk text and its source document in the payload.

use async_trait::async_trait;
use ragbasic_core::config::QdrantConfig;
use ragbasic_ingest::embedding::EmbeddedChunk;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};
use uuid::Uuid;

// ── Types ──────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum VectorStoreError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Qdrant error: {status} — {body}")]
    Api { status: u16, body: String },
}

/// Metadata stored next to every vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkPayload {
    pub text: String,
    #[serde(default)]
    pub doc_id: String,
    #[serde(default)]
    pub start_sentence_index: usize,
    #[serde(default)]
    pub end_sentence_index: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct QdrantPoint {
    pub id: Uuid,
    pub vector: Vec<f32>,
    pub payload: ChunkPayload,
}

impl From<EmbeddedChunk> for QdrantPoint {
    fn from(embedded: EmbeddedChunk) -> Self {
        let chunk = embedded.chunk;
        Self {
            id: chunk.id,
            vector: embedded.vector,
            payload: ChunkPayload {
                text: chunk.text,
                doc_id: chunk.doc_id,
                start_sentence_index: chunk.start_sentence_index,
                end_sentence_index: chunk.end_sentence_index,
            },
        }
    }
}

/// Qdrant point ids are either UUIDs or unsigned integers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointId {
    Uuid(Uuid),
    Num(u64),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: PointId,
    pub score: f32,
    pub payload: ChunkPayload,
}

#[derive(Deserialize)]
struct SearchResponse {
    result: Vec<SearchHit>,
}

// ── Store ──────────────────────────────────────────

/// Persistence seam for chunk vectors.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Create the collection if it does not exist yet.
    async fn ensure_collection(&self, dimensions: usize) -> Result<(), VectorStoreError>;

    /// Insert or replace points in one batch. Returns the number written.
    async fn upsert(&self, points: Vec<QdrantPoint>) -> Result<usize, VectorStoreError>;

    /// Nearest neighbours of `vector`, best first.
    async fn search(&self, vector: Vec<f32>, limit: usize) -> Result<Vec<SearchHit>, VectorStoreError>;
}

pub struct QdrantStore {
    client: reqwest::Client,
    url: String,
    collection: String,
    api_key: Option<String>,
}

impl QdrantStore {
    pub fn new(config: &QdrantConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: config.url.trim_end_matches('/').to_string(),
            collection: config.collection.clone(),
            api_key: config.api_key.clone(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    fn collection_url(&self, suffix: &str) -> String {
        format!("{}/collections/{}{}", self.url, self.collection, suffix)
    }

    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        debug!("Qdrant {} {}", method, url);
        let builder = self.client.request(method, url);
        match &self.api_key {
            Some(key) => builder.header("api-key", key),
            None => builder,
        }
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, VectorStoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(VectorStoreError::Api {
        status: status.as_u16(),
        body,
    })
}

fn collection_body(dimensions: usize) -> serde_json::Value {
    json!({ "vectors": { "size": dimensions, "distance": "Cosine" } })
}

fn search_body(vector: Vec<f32>, limit: usize) -> serde_json::Value {
    json!({ "vector": vector, "limit": limit, "with_payload": true })
}

#[async_trait]
impl VectorStore for QdrantStore {
    async fn ensure_collection(&self, dimensions: usize) -> Result<(), VectorStoreError> {
        let url = self.collection_url("");
        let response = self.request(reqwest::Method::GET, &url).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            info!("Creating Qdrant collection '{}' ({} dims, cosine)", self.collection, dimensions);
            let response = self
                .request(reqwest::Method::PUT, &url)
                .json(&collection_body(dimensions))
                .send()
                .await?;
            check_status(response).await?;
            return Ok(());
        }
        check_status(response).await?;
        Ok(())
    }

    async fn upsert(&self, points: Vec<QdrantPoint>) -> Result<usize, VectorStoreError> {
        if points.is_empty() {
            return Ok(0);
        }
        let count = points.len();
        let url = self.collection_url("/points?wait=true");
        let response = self
            .request(reqwest::Method::PUT, &url)
            .json(&json!({ "points": points }))
            .send()
            .await?;
        check_status(response).await?;
        info!("Upserted {} points into '{}'", count, self.collection);
        Ok(count)
    }

    async fn search(&self, vector: Vec<f32>, limit: usize) -> Result<Vec<SearchHit>, VectorStoreError> {
        let url = self.collection_url("/points/search");
        let response = self
            .request(reqwest::Method::POST, &url)
            .json(&search_body(vector, limit))
            .send()
            .await?;
        let parsed: SearchResponse = check_status(response).await?.json().await?;
        Ok(parsed.result)
    }
}
