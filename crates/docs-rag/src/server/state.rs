//! Application state for the answer service

use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::Result;
use crate::providers::embedding::EmbeddingProvider;
use crate::providers::gemini::{GeminiEmbedder, GeminiGenerator};
use crate::providers::llm::LlmProvider;
use crate::providers::qdrant::QdrantStore;
use crate::providers::vector_store::VectorStoreProvider;

/// Shared server state: configuration plus the injected clients
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStoreProvider>,
    llm: Arc<dyn LlmProvider>,
}

impl AppState {
    /// Build state with clients constructed once from configuration
    pub fn new(config: AppConfig) -> Result<Self> {
        let embedder = Arc::new(GeminiEmbedder::new(&config.embedding));
        let llm = Arc::new(GeminiGenerator::new(&config.llm));
        let store = Arc::new(QdrantStore::new(&config.store)?);
        Ok(Self::with_providers(config, embedder, store, llm))
    }

    /// Build state with explicit providers (tests substitute fakes
    /// here)
    pub fn with_providers(
        config: AppConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStoreProvider>,
        llm: Arc<dyn LlmProvider>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                embedder,
                store,
                llm,
            }),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn embedder(&self) -> &dyn EmbeddingProvider {
        self.inner.embedder.as_ref()
    }

    pub fn store(&self) -> &dyn VectorStoreProvider {
        self.inner.store.as_ref()
    }

    pub fn llm(&self) -> &dyn LlmProvider {
        self.inner.llm.as_ref()
    }
}
