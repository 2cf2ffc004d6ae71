//! Error types for the RAG sidecar

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by ingestion, retrieval, and the chat boundary
#[derive(Debug, Error)]
pub enum Error {
    /// Extension is not in the ingestion allow-list
    #[error("unsupported file format: .{0}")]
    UnsupportedFormat(String),

    /// The underlying reader or parser failed for a file
    #[error("failed to extract text from '{path}': {reason}")]
    ExtractionFailed { path: String, reason: String },

    /// The embedding service failed or returned a malformed vector
    #[error("embedding request failed: {0}")]
    EmbeddingFailed(String),

    /// The vector store rejected a point write
    #[error("vector store rejected write: {0}")]
    StoreWriteFailed(String),

    /// The vector store cannot be reached or the collection is unusable.
    /// Fatal for an ingestion run: nothing can be persisted.
    #[error("vector store unavailable: {0}")]
    StoreUnavailable(String),

    /// The answer generation model failed
    #[error("answer generation failed: {0}")]
    GenerationFailed(String),

    /// The answer service cannot be reached (query-time only)
    #[error("answer service unreachable: {0}")]
    ChatUnreachable(String),

    /// The answer service returned an error response (query-time only)
    #[error("answer service request failed: {0}")]
    ChatRequestFailed(String),

    /// Missing or invalid configuration
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Shorthand for an extraction failure on a specific file
    pub fn extraction(path: impl Into<String>, reason: impl ToString) -> Self {
        Self::ExtractionFailed {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Map errors to a status code and a user-facing message. The full
/// error is logged server-side; clients never see a raw trace.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Error::StoreUnavailable(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "The document index is unavailable right now.",
            ),
            Error::EmbeddingFailed(_) | Error::GenerationFailed(_) => (
                StatusCode::BAD_GATEWAY,
                "The language model service failed to process the request.",
            ),
            Error::Config(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "The server is misconfigured.",
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong while processing the request.",
            ),
        };

        tracing::error!("request failed: {}", self);

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_helper_carries_path_and_reason() {
        let err = Error::extraction("docs/a.md", "bad utf-8");
        match err {
            Error::ExtractionFailed { path, reason } => {
                assert_eq!(path, "docs/a.md");
                assert_eq!(reason, "bad utf-8");
            }
            other => panic!("unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn unsupported_format_names_the_extension() {
        let err = Error::UnsupportedFormat("docx".to_string());
        assert_eq!(err.to_string(), "unsupported file format: .docx");
    }
}
