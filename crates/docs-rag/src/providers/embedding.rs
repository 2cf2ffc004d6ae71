//! Embedding provider trait

use async_trait::async_trait;

use crate::error::Result;

/// Trait for turning chunk text into fixed-length embedding vectors
///
/// Implementations:
/// - `GeminiEmbedder`: hosted embedding model over REST
///
/// One call per chunk, no internal batching or retry; the skip/continue
/// policy lives in the ingestion orchestrator.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate an embedding for a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Expected embedding dimensionality (768 for text-embedding-004)
    fn dimensions(&self) -> usize;

    /// Provider name for logging
    fn name(&self) -> &str;
}
