//! Turns builder spans into identified chunk records.

use uuid::Uuid;

use super::types::{ChunkSpan, DocumentChunk};

/// Attach a fresh random id and `doc_id` to every span.
///
/// Ids are v4 UUIDs drawn from the thread-local RNG, so concurrent callers
/// share no state.
pub fn assemble(spans: Vec<ChunkSpan>, doc_id: &str) -> Vec<DocumentChunk> {
    spans
        .into_iter()
        .map(|span| DocumentChunk {
            id: Uuid::new_v4(),
            start_sentence_index: span.start,
            end_sentence_index: span.end,
            text: span.text,
            doc_id: doc_id.to_string(),
        })
        .collect()
}
