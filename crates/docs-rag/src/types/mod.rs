//! Core data types

pub mod document;
pub mod point;
pub mod query;
pub mod response;

pub use document::{Chunk, Document, DocumentKind};
pub use point::{Distance, PointPayload, ScoredPayload, StoredPoint};
pub use query::QueryRequest;
pub use response::{QueryResponse, RelevantDoc};
