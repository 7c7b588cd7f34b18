//! Document index collaborator
//!
//! The gateway does not embed or rank documents itself; it delegates to
//! a `DocumentIndex` behind a trait so the dispatcher can be wired to a
//! remote vector index in production and to an in-memory fixture in
//! tests and local development.

pub mod fixture;
pub mod remote;

use crate::error::Result;
use crate::types::SearchHit;
use async_trait::async_trait;

pub use fixture::FixtureIndex;
pub use remote::RemoteIndex;

/// Similarity search over named document collections
///
/// Implementations return hits in relevance order; the dispatcher passes
/// that ordering through untouched. Failures to reach the index or to
/// resolve the named collection surface as `SearchUnavailable`.
#[async_trait]
pub trait DocumentIndex: Send + Sync {
    /// Query one collection for the top `k` hits
    async fn query(&self, collection: &str, query: &str, k: usize) -> Result<Vec<SearchHit>>;
}
