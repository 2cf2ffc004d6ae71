//! Ingestion CLI
//!
//! Run with: cargo run -p docs-rag --bin docs-rag-ingest -- ./docs

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docs_rag::providers::gemini::GeminiEmbedder;
use docs_rag::providers::qdrant::QdrantStore;
use docs_rag::{AppConfig, IngestPipeline};

#[derive(Parser)]
#[command(
    name = "docs-rag-ingest",
    about = "Embed a documentation tree into the vector store"
)]
struct Args {
    /// Root directory to ingest
    #[arg(default_value = "docs")]
    docs_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docs_rag=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = AppConfig::from_env()?;

    tracing::info!("Starting document embedding");
    tracing::info!("  - Collection: {}", config.store.collection);
    tracing::info!("  - Embedding model: {}", config.embedding.model);
    tracing::info!(
        "  - Chunk bounds: {}..{} words",
        config.chunking.min_words,
        config.chunking.max_words
    );

    let embedder = Arc::new(GeminiEmbedder::new(&config.embedding));
    let store = Arc::new(QdrantStore::new(&config.store)?);
    let pipeline = IngestPipeline::new(&config, embedder, store);

    // Per-file and per-chunk problems land in the report; only an
    // unreachable store exits non-zero here.
    let report = pipeline.run(&args.docs_dir).await?;

    println!("\nSummary:");
    println!("  files seen:     {}", report.files_seen);
    println!("  files ingested: {}", report.files_ingested);
    println!("  files skipped:  {}", report.files_skipped);
    println!("  chunks:         {}", report.chunks_total);
    println!("  points stored:  {}", report.points_stored);
    if !report.failures.is_empty() {
        println!("  failures:       {}", report.failures.len());
        for failure in &report.failures {
            match failure.chunk_index {
                Some(index) => {
                    println!("    {} (chunk {}): {}", failure.path, index, failure.detail)
                }
                None => println!("    {}: {}", failure.path, failure.detail),
            }
        }
    }
    println!("Embedding finished");

    Ok(())
}
