//! Environment-driven configuration
//!
//! Every config struct has serde-friendly defaults plus a `from_env`
//! constructor for the variables the deployment recognizes. Clients
//! are built once from these structs and passed in explicitly, so
//! tests can substitute fakes.

use serde::{Deserialize, Serialize};
use std::env;

use crate::error::{Error, Result};
use crate::types::point::Distance;

/// Default endpoint for a locally running vector store
const DEFAULT_STORE_URL: &str = "http://localhost:6333";

/// Default endpoint the chat client falls back to
const DEFAULT_CHAT_ENDPOINT: &str = "http://127.0.0.1:8000/query";

/// Top-level configuration for ingestion and the answer service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub embedding: EmbeddingConfig,
    pub chunking: ChunkingConfig,
    pub ingest: IngestConfig,
    pub llm: LlmConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    /// Build configuration from the process environment.
    ///
    /// Fails when no embedding-service API key is present; everything
    /// else falls back to defaults.
    pub fn from_env() -> Result<Self> {
        let api_key = gemini_api_key()?;

        Ok(Self {
            store: StoreConfig::from_env(),
            embedding: EmbeddingConfig {
                api_key: api_key.clone(),
                ..Default::default()
            },
            chunking: ChunkingConfig::default(),
            ingest: IngestConfig::default(),
            llm: LlmConfig {
                api_key,
                ..Default::default()
            },
            server: ServerConfig::default(),
        })
    }
}

fn gemini_api_key() -> Result<String> {
    env::var("GEMINI_API_KEY")
        .or_else(|_| env::var("GEMINI_KEY"))
        .map_err(|_| {
            Error::Config("GEMINI_API_KEY or GEMINI_KEY environment variable is required".to_string())
        })
}

/// Vector store connection and collection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store endpoint URL
    pub url: String,
    /// API key for managed deployments
    pub api_key: Option<String>,
    /// Collection name
    pub collection: String,
    /// Vector dimensionality the collection is created with
    pub dimensions: usize,
    /// Distance metric the collection is created with
    pub distance: Distance,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_STORE_URL.to_string(),
            api_key: None,
            collection: "docs-rag".to_string(),
            dimensions: 768,
            distance: Distance::Cosine,
        }
    }
}

impl StoreConfig {
    /// `QDRANT_URL` + `QDRANT_API_KEY` select a managed instance; with
    /// either absent the local default endpoint is used.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(name) = env::var("DOCS_RAG_COLLECTION") {
            config.collection = name;
        }

        match (env::var("QDRANT_URL"), env::var("QDRANT_API_KEY")) {
            (Ok(url), Ok(key)) => {
                tracing::info!("Using managed vector store at {}", url);
                config.url = url;
                config.api_key = Some(key);
            }
            _ => {
                tracing::info!("Using local vector store at {}", config.url);
            }
        }

        config
    }
}

/// Embedding service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// API key for the embedding service
    pub api_key: String,
    /// Embedding model name
    pub model: String,
    /// Service base URL
    pub base_url: String,
    /// Expected vector dimensionality (768 for text-embedding-004)
    pub dimensions: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "text-embedding-004".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            dimensions: 768,
        }
    }
}

/// Text chunking bounds (word counts)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Minimum words per chunk (the final chunk may be shorter)
    pub min_words: usize,
    /// Maximum words per chunk
    pub max_words: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            min_words: 500,
            max_words: 800,
        }
    }
}

/// Ingestion settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Payload text is truncated to this many bytes to stay under the
    /// store's payload size limits
    pub payload_text_limit: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            payload_text_limit: 10_000,
        }
    }
}

/// Answer generation (LLM) settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// API key for the generation service
    pub api_key: String,
    /// Generation model name
    pub model: String,
    /// Service base URL
    pub base_url: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Output token cap
    pub max_output_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gemini-1.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            temperature: 0.7,
            max_output_tokens: 1024,
        }
    }
}

/// Answer service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable permissive CORS (the chat widget is served from the
    /// docs site origin)
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            enable_cors: true,
        }
    }
}

/// Chat client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Answer-service endpoint the client posts queries to
    pub endpoint: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_CHAT_ENDPOINT.to_string(),
        }
    }
}

impl ChatConfig {
    /// `CHAT_API_URL` override with the local server as fallback
    pub fn from_env() -> Self {
        Self {
            endpoint: env::var("CHAT_API_URL").unwrap_or_else(|_| DEFAULT_CHAT_ENDPOINT.to_string()),
        }
    }
}
