//! LLM provider trait for answer generation

use async_trait::async_trait;

use crate::error::Result;

/// Trait for generating a grounded answer from retrieved context
///
/// Implementations:
/// - `GeminiGenerator`: hosted generation model over REST
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate an answer to `question` using only `context`
    async fn generate_answer(&self, question: &str, context: &str) -> Result<String>;

    /// Provider name for logging
    fn name(&self) -> &str;
}
