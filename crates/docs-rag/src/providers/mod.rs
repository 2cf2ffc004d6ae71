//! Provider traits and client implementations

pub mod embedding;
pub mod gemini;
pub mod llm;
pub mod qdrant;
pub mod vector_store;

pub use embedding::EmbeddingProvider;
pub use llm::LlmProvider;
pub use vector_store::VectorStoreProvider;
