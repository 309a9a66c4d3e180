//! Chunk configuration, errors and output types.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Default maximum words per chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 300;

/// Default words of trailing overlap between adjacent chunks.
pub const DEFAULT_OVERLAP: usize = 50;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChunkError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

// ── Configuration ───────────────────────────────────────────────────────────

/// Validated chunking parameters.
///
/// Construction normalizes an overlap that is not smaller than the chunk size
/// down to `max(chunk_size / 2, 1)`, so the builder never has to re-check it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkConfig {
    chunk_size: usize,
    overlap: usize,
}

impl ChunkConfig {
    /// Validate raw (possibly user-supplied) parameters.
    ///
    /// Both values arrive signed because they come from query strings and
    /// environment variables; negatives are rejected rather than wrapped.
    pub fn new(chunk_size: i64, overlap: i64) -> Result<Self, ChunkError> {
        if chunk_size <= 0 {
            return Err(ChunkError::InvalidArgument(format!(
                "chunk size must be positive, got {chunk_size}"
            )));
        }
        if overlap < 0 {
            return Err(ChunkError::InvalidArgument(format!(
                "overlap must not be negative, got {overlap}"
            )));
        }
        let chunk_size = usize::try_from(chunk_size)
            .map_err(|_| ChunkError::InvalidArgument(format!("chunk size {chunk_size} is too large")))?;
        let overlap = usize::try_from(overlap)
            .map_err(|_| ChunkError::InvalidArgument(format!("overlap {overlap} is too large")))?;
        Ok(Self::normalized(chunk_size, overlap))
    }

    fn normalized(chunk_size: usize, overlap: usize) -> Self {
        let overlap = if overlap >= chunk_size {
            (chunk_size / 2).max(1)
        } else {
            overlap
        };
        Self { chunk_size, overlap }
    }

    /// Maximum words per chunk.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Effective overlap budget in words, after normalization.
    pub fn overlap(&self) -> usize {
        self.overlap
    }
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self::normalized(DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP)
    }
}

// ── Chunk output ────────────────────────────────────────────────────────────

/// A run of consecutive sentences produced by the builder, before it gets an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkSpan {
    /// Index of the first sentence (inclusive).
    pub start: usize,
    /// Index of the last sentence (inclusive).
    pub end: usize,
    pub text: String,
}

/// A chunk record handed to the embedding and vector-storage collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentChunk {
    pub id: Uuid,
    pub start_sentence_index: usize,
    pub end_sentence_index: usize,
    pub text: String,
    pub doc_id: String,
}

impl DocumentChunk {
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// Number of sentences covered by this chunk.
    pub fn sentence_count(&self) -> usize {
        self.end_sentence_index - self.start_sentence_index + 1
    }
}
