//! Ingestion pipeline orchestration
//!
//! Walks a documentation tree and drives extract → chunk → embed →
//! upsert per file, strictly sequentially. Per-file and per-chunk
//! errors are recorded in the report and skipped; only store
//! unavailability aborts the run.

use sha2::{Digest, Sha256};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::ingestion::chunker::Chunker;
use crate::ingestion::extractor::TextExtractor;
use crate::providers::embedding::EmbeddingProvider;
use crate::providers::vector_store::VectorStoreProvider;
use crate::types::point::{Distance, PointPayload, StoredPoint};
use crate::types::{Document, DocumentKind};

/// Where in the per-unit flow a failure happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    UnsupportedFormat,
    Extraction,
    Embedding,
    StoreWrite,
}

/// One skipped file or chunk, with enough context to diagnose
#[derive(Debug, Clone)]
pub struct IngestFailure {
    /// Source document path
    pub path: String,
    /// Chunk ordinal for per-chunk failures, `None` for file-level ones
    pub chunk_index: Option<u32>,
    pub kind: FailureKind,
    pub detail: String,
}

/// Aggregate outcome of an ingestion run
#[derive(Debug, Default)]
pub struct IngestReport {
    /// Allow-listed files found under the root
    pub files_seen: usize,
    /// Files that produced at least one chunk
    pub files_ingested: usize,
    /// Files whose extracted text was empty (skipped, not errored)
    pub files_skipped: usize,
    /// Chunks produced across all files
    pub chunks_total: usize,
    /// Points successfully written to the store
    pub points_stored: usize,
    /// Per-file and per-chunk failures
    pub failures: Vec<IngestFailure>,
}

impl IngestReport {
    /// Failures attributable to a single chunk
    pub fn failed_chunks(&self) -> usize {
        self.failures.iter().filter(|f| f.chunk_index.is_some()).count()
    }

    /// Failures that skipped a whole file
    pub fn failed_files(&self) -> usize {
        self.failures.iter().filter(|f| f.chunk_index.is_none()).count()
    }
}

impl fmt::Display for IngestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} files seen, {} ingested, {} skipped, {} chunks, {} points stored, {} failures",
            self.files_seen,
            self.files_ingested,
            self.files_skipped,
            self.chunks_total,
            self.points_stored,
            self.failures.len()
        )
    }
}

/// Drives end-to-end ingestion with injected clients
pub struct IngestPipeline {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStoreProvider>,
    chunker: Chunker,
    collection: String,
    dimensions: usize,
    distance: Distance,
    payload_text_limit: usize,
}

impl IngestPipeline {
    /// Create a pipeline from configuration and the two clients it
    /// drives
    pub fn new(
        config: &AppConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStoreProvider>,
    ) -> Self {
        Self {
            embedder,
            store,
            chunker: Chunker::new(config.chunking.min_words, config.chunking.max_words),
            collection: config.store.collection.clone(),
            dimensions: config.store.dimensions,
            distance: config.store.distance,
            payload_text_limit: config.ingest.payload_text_limit,
        }
    }

    /// Ingest every supported file under `root`.
    ///
    /// Fails only when the collection cannot be ensured up front;
    /// everything after that is recorded in the report instead of
    /// propagating.
    pub async fn run(&self, root: &Path) -> Result<IngestReport> {
        self.store
            .ensure_collection(&self.collection, self.dimensions, self.distance)
            .await?;

        let files = discover_files(root);
        tracing::info!("Found {} files to process under {}", files.len(), root.display());

        let mut report = IngestReport {
            files_seen: files.len(),
            ..Default::default()
        };

        for path in &files {
            tracing::info!("Processing file: {}", path.display());
            match self.ingest_file(path, &mut report).await {
                Ok(true) => report.files_ingested += 1,
                Ok(false) => {
                    tracing::info!("Skipping empty file: {}", path.display());
                    report.files_skipped += 1;
                }
                Err(e) => {
                    tracing::warn!("Failed to process {}: {}", path.display(), e);
                    report.failures.push(IngestFailure {
                        path: path.display().to_string(),
                        chunk_index: None,
                        kind: failure_kind(&e),
                        detail: e.to_string(),
                    });
                }
            }
        }

        tracing::info!("Ingestion finished: {}", report);
        Ok(report)
    }

    /// Process one file. Returns `Ok(false)` when the file produced no
    /// text to index.
    async fn ingest_file(&self, path: &Path, report: &mut IngestReport) -> Result<bool> {
        let Some(kind) = DocumentKind::from_path(path) else {
            let extension = path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("")
                .to_lowercase();
            return Err(Error::UnsupportedFormat(extension));
        };

        // The document lives only until its chunks are produced.
        let document = Document {
            path: path.to_path_buf(),
            kind,
            text: TextExtractor::extract(path)?,
        };
        if document.text.trim().is_empty() {
            return Ok(false);
        }

        let chunks = self.chunker.chunk(&document.text);
        tracing::info!("Split into {} chunks", chunks.len());
        report.chunks_total += chunks.len();

        let source = document.path.display().to_string();
        for chunk in &chunks {
            // One outstanding embedding call and one store write at a
            // time; chunks of a document are stored in production order.
            let vector = match self.embedder.embed(&chunk.text).await {
                Ok(vector) => vector,
                Err(e) => {
                    tracing::warn!("Embedding failed for {} chunk {}: {}", source, chunk.index, e);
                    report.failures.push(IngestFailure {
                        path: source.clone(),
                        chunk_index: Some(chunk.index),
                        kind: FailureKind::Embedding,
                        detail: e.to_string(),
                    });
                    continue;
                }
            };

            let point = StoredPoint {
                id: point_id(&source, chunk.index),
                vector,
                payload: PointPayload {
                    text: truncate_on_char_boundary(&chunk.text, self.payload_text_limit),
                    source: source.clone(),
                    chunk_index: chunk.index,
                },
            };

            match self
                .store
                .upsert_points(&self.collection, std::slice::from_ref(&point))
                .await
            {
                Ok(()) => {
                    report.points_stored += 1;
                    tracing::debug!("Chunk {}/{} stored", chunk.index + 1, chunks.len());
                }
                Err(e) => {
                    tracing::warn!("Store rejected {} chunk {}: {}", source, chunk.index, e);
                    report.failures.push(IngestFailure {
                        path: source.clone(),
                        chunk_index: Some(chunk.index),
                        kind: FailureKind::StoreWrite,
                        detail: e.to_string(),
                    });
                }
            }
        }

        Ok(true)
    }
}

/// Recursively collect files whose extension is in the allow-list.
/// Directories are always recursed; non-matching files are passed over
/// without being counted.
fn discover_files(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| DocumentKind::from_path(path).is_some())
        .collect()
}

/// Deterministic point id for a chunk: the leading 8 bytes of SHA-256
/// over the source path and chunk index. Re-ingesting the same tree
/// overwrites the same points instead of accumulating duplicates.
pub fn point_id(source: &str, chunk_index: u32) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(source.as_bytes());
    hasher.update([0u8]);
    hasher.update(chunk_index.to_le_bytes());
    let digest = hasher.finalize();

    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

/// Truncate to at most `limit` bytes without splitting a character
fn truncate_on_char_boundary(text: &str, limit: usize) -> String {
    if text.len() <= limit {
        return text.to_string();
    }
    let mut end = limit;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    text[..end].to_string()
}

fn failure_kind(error: &Error) -> FailureKind {
    match error {
        Error::UnsupportedFormat(_) => FailureKind::UnsupportedFormat,
        Error::EmbeddingFailed(_) => FailureKind::Embedding,
        Error::StoreWriteFailed(_) => FailureKind::StoreWrite,
        _ => FailureKind::Extraction,
    }
}
