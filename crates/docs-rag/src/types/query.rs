//! Query request types

use serde::{Deserialize, Serialize};

fn default_top_k() -> usize {
    5
}

fn default_max_context_length() -> usize {
    2000
}

/// Request body for the `/query` endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    /// Natural-language question
    pub query: String,
    /// How many chunks to retrieve
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Character budget for the context handed to the model
    #[serde(default = "default_max_context_length")]
    pub max_context_length: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_take_defaults() {
        let request: QueryRequest = serde_json::from_str(r#"{"query":"what is a rover?"}"#).unwrap();
        assert_eq!(request.query, "what is a rover?");
        assert_eq!(request.top_k, 5);
        assert_eq!(request.max_context_length, 2000);
    }
}
