//! Answer service binary
//!
//! Run with: cargo run -p docs-rag --bin docs-rag-server

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docs_rag::config::AppConfig;
use docs_rag::server::RagServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docs_rag=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - Vector store: {}", config.store.url);
    tracing::info!("  - Collection: {}", config.store.collection);
    tracing::info!(
        "  - Embedding model: {} ({} dims)",
        config.embedding.model,
        config.embedding.dimensions
    );
    tracing::info!("  - Generation model: {}", config.llm.model);

    let server = RagServer::new(config)?;

    println!("Answer service starting...");
    println!("  API: http://{}", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("\nEndpoints:");
    println!("  POST /query - Ask a question");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
