//! Sentence-aware chunking engine.
//!
//! Splits normalized document text into sentences and packs consecutive
//! sentences into chunks bounded by a word budget. After each chunk the builder
//! backs off over trailing sentences up to the overlap budget before advancing.
//! Chunks never split a sentence.

mod assembler;
mod builder;
mod sentences;
mod types;

pub use assembler::assemble;
pub use builder::build_chunks;
pub use sentences::{count_words, split_sentences, Sentences};
pub use types::{ChunkConfig, ChunkError, ChunkSpan, DocumentChunk, DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP};

use uuid::Uuid;

/// Chunk `text` by sentences and tag every chunk with `doc_id`.
///
/// `text` is expected to be whitespace-normalized already (see
/// [`crate::document::normalize_whitespace`]); it is not normalized again.
pub fn chunk_text_by_sentences(text: &str, config: &ChunkConfig, doc_id: &str) -> Vec<DocumentChunk> {
    let sentences: Vec<&str> = split_sentences(text).collect();
    let spans = build_chunks(&sentences, config);
    tracing::debug!(
        doc_id,
        sentences = sentences.len(),
        chunks = spans.len(),
        chunk_size = config.chunk_size(),
        overlap = config.overlap(),
        "chunked document"
    );
    assemble(spans, doc_id)
}

/// Chunk with the default parameters and a freshly generated document id.
pub fn chunk_text_with_overlap(text: &str) -> Vec<DocumentChunk> {
    let doc_id = Uuid::new_v4().to_string();
    chunk_text_by_sentences(text, &ChunkConfig::default(), &doc_id)
}
