//! chunk: extract a local document and print its sentence chunks as JSON.
//!
//! Useful for tuning chunk size and overlap before ingesting into the vector
//! store. Defaults come from the same environment as the server.

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use ragbasic_ingest::document::chunker::{chunk_text_by_sentences, ChunkConfig};
use ragbasic_ingest::document::extract_file;

// ── CLI ─────────────────────────────────────────────────────────────

/// Split a document into sentence-aligned chunks.
#[derive(Parser, Debug)]
#[command(name = "chunk", version, about)]
struct Cli {
    /// Document to chunk (.txt, .md or .pdf).
    path: PathBuf,

    /// Maximum words per chunk.
    #[arg(long, env = "CHUNK_SIZE", default_value_t = 300, allow_negative_numbers = true)]
    chunk_size: i64,

    /// Overlap budget in words for the backoff after each chunk.
    #[arg(long, env = "CHUNK_OVERLAP", default_value_t = 50, allow_negative_numbers = true)]
    overlap: i64,

    /// Document id stamped on every chunk (defaults to the file name).
    #[arg(long)]
    doc_id: Option<String>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

// ── main ────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    ragbasic_core::config::load_dotenv();
    let cli = Cli::parse();

    let config = ChunkConfig::new(cli.chunk_size, cli.overlap)?;
    let doc = extract_file(&cli.path)?;
    info!(
        file = %doc.filename,
        file_type = %doc.file_type,
        chars = doc.char_count(),
        "extracted document"
    );

    let doc_id = cli.doc_id.unwrap_or_else(|| doc.filename.clone());
    let chunks = chunk_text_by_sentences(&doc.text, &config, &doc_id);
    info!(
        chunks = chunks.len(),
        chunk_size = config.chunk_size(),
        overlap = config.overlap(),
        "chunking complete"
    );

    let json = if cli.pretty {
        serde_json::to_string_pretty(&chunks)?
    } else {
        serde_json::to_string(&chunks)?
    };
    println!("{json}");
    Ok(())
}
