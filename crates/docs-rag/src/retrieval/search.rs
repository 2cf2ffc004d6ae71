//! Embed a question and retrieve relevant chunks

use crate::error::Result;
use crate::providers::embedding::EmbeddingProvider;
use crate::providers::vector_store::VectorStoreProvider;
use crate::types::point::ScoredPayload;

/// Retrieved chunks plus the bounded context assembled from them
#[derive(Debug, Default)]
pub struct RetrievedContext {
    /// Hits with non-empty payload text, best first
    pub hits: Vec<ScoredPayload>,
    /// Hit texts joined with blank lines, capped at the context budget
    pub context: String,
}

/// Embed `query`, search `collection`, and assemble a context capped
/// at `max_context_length` characters. Hits whose stored text is empty
/// are dropped; hits that would overflow the budget are kept in
/// `hits` but left out of the context.
pub async fn retrieve(
    embedder: &dyn EmbeddingProvider,
    store: &dyn VectorStoreProvider,
    collection: &str,
    query: &str,
    top_k: usize,
    max_context_length: usize,
) -> Result<RetrievedContext> {
    let query_embedding = embedder.embed(query).await?;
    tracing::debug!("query embedding length: {}", query_embedding.len());

    let mut hits = store.search(collection, &query_embedding, top_k).await?;
    hits.retain(|hit| !hit.payload.text.trim().is_empty());

    let mut context_parts: Vec<&str> = Vec::new();
    let mut context_len = 0usize;
    for hit in &hits {
        let text = hit.payload.text.as_str();
        if context_len + text.len() > max_context_length {
            continue;
        }
        context_len += text.len();
        context_parts.push(text);
    }

    Ok(RetrievedContext {
        context: context_parts.join("\n\n"),
        hits,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::error::Error;
    use crate::types::point::{Distance, PointPayload, StoredPoint};

    struct FixedEmbedder;

    #[async_trait]
    impl EmbeddingProvider for FixedEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(vec![1.0, 0.0])
        }

        fn dimensions(&self) -> usize {
            2
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    struct CannedStore {
        hits: Vec<ScoredPayload>,
    }

    #[async_trait]
    impl VectorStoreProvider for CannedStore {
        async fn ensure_collection(
            &self,
            _collection: &str,
            _dimensions: usize,
            _distance: Distance,
        ) -> Result<()> {
            Ok(())
        }

        async fn upsert_points(&self, _collection: &str, _points: &[StoredPoint]) -> Result<()> {
            Err(Error::Internal("not used".to_string()))
        }

        async fn search(
            &self,
            _collection: &str,
            _vector: &[f32],
            _limit: usize,
        ) -> Result<Vec<ScoredPayload>> {
            Ok(self.hits.clone())
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }

        fn name(&self) -> &str {
            "canned"
        }
    }

    fn hit(text: &str, score: f32) -> ScoredPayload {
        ScoredPayload {
            payload: PointPayload {
                text: text.to_string(),
                source: "docs/a.md".to_string(),
                chunk_index: 0,
            },
            score,
        }
    }

    #[tokio::test]
    async fn empty_text_hits_are_dropped() {
        let store = CannedStore {
            hits: vec![hit("useful", 0.9), hit("   ", 0.8)],
        };
        let retrieved = retrieve(&FixedEmbedder, &store, "docs", "q", 5, 2000)
            .await
            .unwrap();
        assert_eq!(retrieved.hits.len(), 1);
        assert_eq!(retrieved.context, "useful");
    }

    #[tokio::test]
    async fn context_respects_the_length_budget() {
        let store = CannedStore {
            hits: vec![hit("aaaaaaaaaa", 0.9), hit("bbbbbbbbbb", 0.8), hit("cc", 0.7)],
        };
        // Budget fits the first hit and the short third one, not the
        // second.
        let retrieved = retrieve(&FixedEmbedder, &store, "docs", "q", 5, 13)
            .await
            .unwrap();
        assert_eq!(retrieved.hits.len(), 3);
        assert_eq!(retrieved.context, "aaaaaaaaaa\n\ncc");
    }
}
