//! Query response types

use serde::{Deserialize, Serialize};

use crate::types::point::ScoredPayload;

/// A retrieved chunk returned to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelevantDoc {
    pub text: String,
    pub source: String,
    pub score: f32,
}

impl From<&ScoredPayload> for RelevantDoc {
    fn from(hit: &ScoredPayload) -> Self {
        Self {
            text: hit.payload.text.clone(),
            source: hit.payload.source.clone(),
            score: hit.score,
        }
    }
}

/// Response body for the `/query` endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    pub answer: String,
    pub relevant_docs: Vec<RelevantDoc>,
}

impl QueryResponse {
    /// Friendly answer for an empty retrieval, not an error
    pub fn not_found() -> Self {
        Self {
            answer: "I could not find relevant information in the documentation.".to_string(),
            relevant_docs: Vec::new(),
        }
    }
}
