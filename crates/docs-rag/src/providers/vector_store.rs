//! Vector store provider trait

use async_trait::async_trait;

use crate::error::Result;
use crate::types::point::{Distance, ScoredPayload, StoredPoint};

/// Trait for vector persistence and similarity search
///
/// Implementations:
/// - `QdrantStore`: remote store over REST
#[async_trait]
pub trait VectorStoreProvider: Send + Sync {
    /// Make sure `collection` exists with the given dimensionality and
    /// metric. Idempotent: an existing matching collection is a no-op;
    /// an unreachable store or a mismatched collection is
    /// `StoreUnavailable`.
    async fn ensure_collection(
        &self,
        collection: &str,
        dimensions: usize,
        distance: Distance,
    ) -> Result<()>;

    /// Insert or overwrite points, keyed by point id
    async fn upsert_points(&self, collection: &str, points: &[StoredPoint]) -> Result<()>;

    /// Top-`limit` nearest points to `vector`, reduced to their
    /// payloads
    async fn search(
        &self,
        collection: &str,
        vector: &[f32],
        limit: usize,
    ) -> Result<Vec<ScoredPayload>>;

    /// Check that the store is reachable
    async fn health_check(&self) -> Result<bool>;

    /// Provider name for logging
    fn name(&self) -> &str;
}
