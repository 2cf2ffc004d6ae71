//! Stored point and payload types for the vector store

use serde::{Deserialize, Serialize};

/// Distance metric for a collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Distance {
    #[default]
    Cosine,
    Dot,
    Euclid,
}

/// Non-vector metadata stored alongside a point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointPayload {
    /// Chunk text, truncated to the configured payload limit
    pub text: String,
    /// Source document path
    pub source: String,
    /// Chunk ordinal within the source document
    #[serde(default)]
    pub chunk_index: u32,
}

/// The persisted unit in the vector store. Upserting the same id again
/// overwrites the record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredPoint {
    /// Numeric point identifier
    pub id: u64,
    /// Embedding vector; length must match the collection dimensionality
    pub vector: Vec<f32>,
    pub payload: PointPayload,
}

/// A search hit reduced to its payload and similarity score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredPayload {
    pub payload: PointPayload,
    pub score: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_serializes_to_wire_names() {
        assert_eq!(serde_json::to_value(Distance::Cosine).unwrap(), "Cosine");
        assert_eq!(serde_json::to_value(Distance::Dot).unwrap(), "Dot");
        assert_eq!(serde_json::to_value(Distance::Euclid).unwrap(), "Euclid");
    }

    #[test]
    fn payload_tolerates_missing_chunk_index() {
        let payload: PointPayload =
            serde_json::from_str(r#"{"text":"hello","source":"docs/a.md"}"#).unwrap();
        assert_eq!(payload.chunk_index, 0);
    }
}
