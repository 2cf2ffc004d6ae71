//! Query endpoint: retrieve and generate a grounded answer

use axum::extract::State;
use axum::Json;
use std::time::Instant;

use crate::error::Result;
use crate::retrieval;
use crate::server::state::AppState;
use crate::types::{QueryRequest, QueryResponse, RelevantDoc};

/// POST /query - answer a question from the indexed documentation
pub async fn answer_query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>> {
    let start = Instant::now();
    tracing::info!("Query: \"{}\"", request.query);

    let collection = &state.config().store.collection;
    let retrieved = retrieval::retrieve(
        state.embedder(),
        state.store(),
        collection,
        &request.query,
        request.top_k,
        request.max_context_length,
    )
    .await?;

    if retrieved.hits.is_empty() {
        tracing::info!("No relevant chunks for query");
        return Ok(Json(QueryResponse::not_found()));
    }

    let answer = state
        .llm()
        .generate_answer(&request.query, &retrieved.context)
        .await?;

    let relevant_docs: Vec<RelevantDoc> = retrieved.hits.iter().map(RelevantDoc::from).collect();

    tracing::info!(
        "Query answered in {}ms with {} documents",
        start.elapsed().as_millis(),
        relevant_docs.len()
    );

    Ok(Json(QueryResponse {
        answer,
        relevant_docs,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Arc;

    use crate::config::AppConfig;
    use crate::error::Error;
    use crate::providers::embedding::EmbeddingProvider;
    use crate::providers::llm::LlmProvider;
    use crate::providers::vector_store::VectorStoreProvider;
    use crate::types::point::{Distance, PointPayload, ScoredPayload, StoredPoint};

    struct FixedEmbedder;

    #[async_trait]
    impl EmbeddingProvider for FixedEmbedder {
        async fn embed(&self, _text: &str) -> crate::error::Result<Vec<f32>> {
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
        ) -> crate::error::Result<()> {
            Ok(())
        }

        async fn upsert_points(
            &self,
            _collection: &str,
            _points: &[StoredPoint],
        ) -> crate::error::Result<()> {
            Err(Error::Internal("not used".to_string()))
        }

        async fn search(
            &self,
            _collection: &str,
            _vector: &[f32],
            _limit: usize,
        ) -> crate::error::Result<Vec<ScoredPayload>> {
            Ok(self.hits.clone())
        }

        async fn health_check(&self) -> crate::error::Result<bool> {
            Ok(true)
        }

        fn name(&self) -> &str {
            "canned"
        }
    }

    struct EchoLlm;

    #[async_trait]
    impl LlmProvider for EchoLlm {
        async fn generate_answer(
            &self,
            question: &str,
            context: &str,
        ) -> crate::error::Result<String> {
            Ok(format!("answer to '{}' from {} bytes", question, context.len()))
        }

        fn name(&self) -> &str {
            "echo"
        }
    }

    fn state_with_hits(hits: Vec<ScoredPayload>) -> AppState {
        AppState::with_providers(
            AppConfig::default(),
            Arc::new(FixedEmbedder),
            Arc::new(CannedStore { hits }),
            Arc::new(EchoLlm),
        )
    }

    fn request(query: &str) -> QueryRequest {
        serde_json::from_value(serde_json::json!({ "query": query })).unwrap()
    }

    #[tokio::test]
    async fn empty_retrieval_yields_the_not_found_answer() {
        let state = state_with_hits(Vec::new());
        let Json(response) = answer_query(State(state), Json(request("anything?")))
            .await
            .unwrap();
        assert_eq!(
            response.answer,
            "I could not find relevant information in the documentation."
        );
        assert!(response.relevant_docs.is_empty());
    }

    #[tokio::test]
    async fn hits_become_relevant_docs_alongside_the_answer() {
        let hits = vec![ScoredPayload {
            payload: PointPayload {
                text: "rovers roam".to_string(),
                source: "docs/rovers.md".to_string(),
                chunk_index: 2,
            },
            score: 0.87,
        }];
        let state = state_with_hits(hits);
        let Json(response) = answer_query(State(state), Json(request("what roams?")))
            .await
            .unwrap();
        assert!(response.answer.starts_with("answer to 'what roams?'"));
        assert_eq!(response.relevant_docs.len(), 1);
        assert_eq!(response.relevant_docs[0].source, "docs/rovers.md");
        assert_eq!(response.relevant_docs[0].score, 0.87);
    }
}
