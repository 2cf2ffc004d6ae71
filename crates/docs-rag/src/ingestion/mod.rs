//! Document ingestion: extraction, chunking, and orchestration

pub mod chunker;
pub mod extractor;
pub mod pipeline;

pub use chunker::Chunker;
pub use extractor::TextExtractor;
pub use pipeline::{point_id, FailureKind, IngestFailure, IngestPipeline, IngestReport};
