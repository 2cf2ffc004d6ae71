//! docs-rag: RAG sidecar for a documentation tree
//!
//! Ingests a docs directory into a remote vector store (extract →
//! chunk → embed → upsert), serves grounded answers over HTTP, and
//! ships a thin chat client for the answer service.

pub mod chat;
pub mod config;
pub mod error;
pub mod ingestion;
pub mod providers;
pub mod retrieval;
pub mod server;
pub mod types;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use ingestion::{Chunker, IngestPipeline, IngestReport, TextExtractor};
pub use types::{Chunk, Document, DocumentKind};
