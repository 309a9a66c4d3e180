//! Document ingestion: text extraction, sentence-aware chunking and embedding.

pub mod document;
pub mod embedding;
