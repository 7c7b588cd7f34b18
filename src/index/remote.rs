//! HTTP adapter for a remote document index
//!
//! Speaks a small JSON contract to an index sidecar (the process that
//! owns the embedding model and vector store):
//!
//! ```text
//! POST {base_url}/collections/{name}/query
//! {"query": "...", "k": 3}
//! -> [{"text": "...", "meta": {...}}, ...]
//! ```
//!
//! Every transport failure, non-success status, or malformed body maps
//! to `SearchUnavailable`; retry policy belongs to the sidecar's
//! operators, not to this adapter.

use super::DocumentIndex;
use crate::error::{AnamnesisError, Result};
use crate::types::SearchHit;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Client for a remote index sidecar
pub struct RemoteIndex {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    query: &'a str,
    k: usize,
}

impl RemoteIndex {
    /// Create a client for the sidecar at `base_url`
    ///
    /// The request timeout is a hard bound on one query; the dispatcher
    /// applies its own timeout on top, so either bound ends the call.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AnamnesisError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl DocumentIndex for RemoteIndex {
    async fn query(&self, collection: &str, query: &str, k: usize) -> Result<Vec<SearchHit>> {
        let url = format!("{}/collections/{}/query", self.base_url, collection);
        debug!(collection, k, "querying remote index");

        let response = self
            .client
            .post(&url)
            .json(&QueryRequest { query, k })
            .send()
            .await
            .map_err(|e| AnamnesisError::SearchUnavailable(format!("index request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AnamnesisError::SearchUnavailable(format!(
                "index returned status {} for collection '{}'",
                response.status(),
                collection
            )));
        }

        let hits: Vec<SearchHit> = response.json().await.map_err(|e| {
            AnamnesisError::SearchUnavailable(format!("malformed index response: {e}"))
        })?;

        debug!(collection, hits = hits.len(), "remote index responded");
        Ok(hits)
    }
}
