//! REST client for a Qdrant-compatible vector store
//!
//! Speaks the collections and points APIs directly: collection
//! existence check and creation, point upsert in both the object-list
//! and columnar batch wire forms, and nearest-neighbour search.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::config::StoreConfig;
use crate::error::{Error, Result};
use crate::types::point::{Distance, PointPayload, ScoredPayload, StoredPoint};

use super::vector_store::VectorStoreProvider;

/// Points per columnar upsert request
const UPSERT_BATCH_SIZE: usize = 100;

/// Remote vector store client
pub struct QdrantStore {
    client: reqwest::Client,
    base_url: String,
}

impl QdrantStore {
    /// Build a client from store configuration. Managed deployments
    /// authenticate with an `api-key` header on every request.
    pub fn new(config: &StoreConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(key) = &config.api_key {
            headers.insert(
                "api-key",
                HeaderValue::from_str(key.trim())
                    .map_err(|_| Error::Config("invalid vector store API key".to_string()))?,
            );
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Config(format!("failed to build store HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/collections/{}", self.base_url, collection)
    }

    async fn upsert_list(&self, collection: &str, points: &[StoredPoint]) -> Result<()> {
        let request = PointsUpsertRequest { points };
        self.send_upsert(collection, &request).await
    }

    async fn upsert_columnar(&self, collection: &str, points: &[StoredPoint]) -> Result<()> {
        let request = BatchUpsertRequest {
            batch: PointsBatch {
                ids: points.iter().map(|p| p.id).collect(),
                vectors: points.iter().map(|p| p.vector.as_slice()).collect(),
                payloads: points.iter().map(|p| &p.payload).collect(),
            },
        };
        self.send_upsert(collection, &request).await
    }

    async fn send_upsert<T: Serialize>(&self, collection: &str, body: &T) -> Result<()> {
        let response = self
            .client
            .put(format!("{}/points?wait=true", self.collection_url(collection)))
            .json(body)
            .send()
            .await
            .map_err(|e| Error::StoreWriteFailed(format!("upsert request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::StoreWriteFailed(format!(
                "upsert returned {}: {}",
                status, body
            )));
        }

        Ok(())
    }
}

/// Collection creation body: `{"vectors": {"size": …, "distance": …}}`
#[derive(Serialize)]
struct CreateCollectionRequest {
    vectors: VectorParams,
}

#[derive(Serialize, Deserialize)]
struct VectorParams {
    size: usize,
    distance: Distance,
}

#[derive(Deserialize)]
struct CollectionInfoResponse {
    result: CollectionInfo,
}

#[derive(Deserialize)]
struct CollectionInfo {
    config: CollectionConfig,
}

#[derive(Deserialize)]
struct CollectionConfig {
    params: CollectionParams,
}

#[derive(Deserialize)]
struct CollectionParams {
    vectors: VectorParams,
}

/// Object-list upsert form: `{"points": [{id, vector, payload}]}`
#[derive(Serialize)]
struct PointsUpsertRequest<'a> {
    points: &'a [StoredPoint],
}

/// Columnar upsert form:
/// `{"batch": {"ids": …, "vectors": …, "payloads": …}}`
#[derive(Serialize)]
struct BatchUpsertRequest<'a> {
    batch: PointsBatch<'a>,
}

#[derive(Serialize)]
struct PointsBatch<'a> {
    ids: Vec<u64>,
    vectors: Vec<&'a [f32]>,
    payloads: Vec<&'a PointPayload>,
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    vector: &'a [f32],
    limit: usize,
    with_payload: bool,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    result: Vec<SearchHit>,
}

#[derive(Deserialize)]
struct SearchHit {
    score: f32,
    #[serde(default)]
    payload: Option<PointPayload>,
}

#[async_trait]
impl VectorStoreProvider for QdrantStore {
    async fn ensure_collection(
        &self,
        collection: &str,
        dimensions: usize,
        distance: Distance,
    ) -> Result<()> {
        let response = self
            .client
            .get(self.collection_url(collection))
            .send()
            .await
            .map_err(|e| {
                Error::StoreUnavailable(format!(
                    "cannot reach vector store at {}: {}",
                    self.base_url, e
                ))
            })?;

        if response.status().is_success() {
            // The collection must match the configured dimensionality
            // before any upsert; a mismatch makes the run pointless.
            let info: CollectionInfoResponse = response.json().await.map_err(|e| {
                Error::StoreUnavailable(format!("unexpected collection info response: {}", e))
            })?;
            let params = info.result.config.params.vectors;
            if params.size != dimensions || params.distance != distance {
                return Err(Error::StoreUnavailable(format!(
                    "collection '{}' exists with {} dimensions ({:?}), expected {} ({:?})",
                    collection, params.size, params.distance, dimensions, distance
                )));
            }
            tracing::info!("Collection '{}' already exists", collection);
            return Ok(());
        }

        if response.status() != StatusCode::NOT_FOUND {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::StoreUnavailable(format!(
                "collection check returned {}: {}",
                status, body
            )));
        }

        tracing::info!("Creating collection '{}'...", collection);
        let request = CreateCollectionRequest {
            vectors: VectorParams {
                size: dimensions,
                distance,
            },
        };
        let response = self
            .client
            .put(self.collection_url(collection))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                Error::StoreUnavailable(format!(
                    "cannot reach vector store at {}: {}",
                    self.base_url, e
                ))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::StoreUnavailable(format!(
                "collection creation returned {}: {}",
                status, body
            )));
        }

        tracing::info!("Collection '{}' created", collection);
        Ok(())
    }

    async fn upsert_points(&self, collection: &str, points: &[StoredPoint]) -> Result<()> {
        if points.is_empty() {
            return Ok(());
        }

        // A single point takes the object-list form; larger writes use
        // the columnar batch form. Both produce the same stored state.
        if points.len() == 1 {
            return self.upsert_list(collection, points).await;
        }

        let mut failed: Vec<u64> = Vec::new();
        for slice in points.chunks(UPSERT_BATCH_SIZE) {
            if let Err(e) = self.upsert_columnar(collection, slice).await {
                // One malformed point must not block the rest of the
                // batch: fall back to per-point writes and report which
                // ids were rejected.
                tracing::warn!(
                    "batch upsert of {} points failed ({}), retrying per point",
                    slice.len(),
                    e
                );
                for point in slice {
                    if let Err(e) = self.upsert_list(collection, std::slice::from_ref(point)).await
                    {
                        tracing::error!("point {} rejected: {}", point.id, e);
                        failed.push(point.id);
                    }
                }
            }
        }

        if failed.is_empty() {
            Ok(())
        } else {
            Err(Error::StoreWriteFailed(format!(
                "{} of {} points rejected (ids: {:?})",
                failed.len(),
                points.len(),
                failed
            )))
        }
    }

    async fn search(
        &self,
        collection: &str,
        vector: &[f32],
        limit: usize,
    ) -> Result<Vec<ScoredPayload>> {
        let request = SearchRequest {
            vector,
            limit,
            with_payload: true,
        };

        let response = self
            .client
            .post(format!("{}/points/search", self.collection_url(collection)))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                Error::StoreUnavailable(format!(
                    "cannot reach vector store at {}: {}",
                    self.base_url, e
                ))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::StoreUnavailable(format!(
                "search returned {}: {}",
                status, body
            )));
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| Error::StoreUnavailable(format!("unexpected search response: {}", e)))?;

        Ok(parsed
            .result
            .into_iter()
            .filter_map(|hit| {
                hit.payload.map(|payload| ScoredPayload {
                    payload,
                    score: hit.score,
                })
            })
            .collect())
    }

    async fn health_check(&self) -> Result<bool> {
        match self
            .client
            .get(format!("{}/collections", self.base_url))
            .send()
            .await
        {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    fn name(&self) -> &str {
        "qdrant"
    }
}
