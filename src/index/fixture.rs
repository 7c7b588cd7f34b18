//! In-memory document index for tests and local development
//!
//! Holds canned documents per collection and "ranks" them in insertion
//! order. Lets the full gateway run without an index sidecar, and gives
//! tests a deterministic collaborator.

use super::DocumentIndex;
use crate::error::{AnamnesisError, Result};
use crate::types::SearchHit;
use async_trait::async_trait;
use std::collections::HashMap;

/// Deterministic in-memory index
#[derive(Default)]
pub struct FixtureIndex {
    collections: HashMap<String, Vec<SearchHit>>,
}

impl FixtureIndex {
    /// Create an index with no collections
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a collection of documents, returning self for chaining
    pub fn with_collection(
        mut self,
        name: impl Into<String>,
        docs: Vec<SearchHit>,
    ) -> Self {
        self.collections.insert(name.into(), docs);
        self
    }
}

#[async_trait]
impl DocumentIndex for FixtureIndex {
    async fn query(&self, collection: &str, _query: &str, k: usize) -> Result<Vec<SearchHit>> {
        let docs = self.collections.get(collection).ok_or_else(|| {
            AnamnesisError::SearchUnavailable(format!("unknown collection '{collection}'"))
        })?;

        Ok(docs.iter().take(k).cloned().collect())
    }
}
