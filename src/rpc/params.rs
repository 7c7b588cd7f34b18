//! Typed parameter contracts, one struct per method
//!
//! Parameters arrive as a free-form JSON value and are deserialized
//! into these structs at the dispatcher boundary, centralizing the
//! `InvalidParams` contract instead of scattering checks across
//! handlers. Unknown fields are ignored, matching the wire contract.

use serde::Deserialize;

/// Parameters for `search_*` methods
#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    /// Query text
    pub query: String,

    /// Result count; falls back to the configured default when absent
    pub k: Option<usize>,
}

/// Parameters for `insert_memory`
#[derive(Debug, Clone, Deserialize)]
pub struct InsertMemoryParams {
    pub session_id: String,
    pub text: String,
}

/// Parameters for `fetch_memory`
#[derive(Debug, Clone, Deserialize)]
pub struct FetchMemoryParams {
    pub session_id: String,
}

/// Parameters for `insert_confidence`
#[derive(Debug, Clone, Deserialize)]
pub struct InsertConfidenceParams {
    pub query: String,
    pub response: String,
    pub confidence_score: f64,
}

/// Parameters for `insert_feedback`
#[derive(Debug, Clone, Deserialize)]
pub struct InsertFeedbackParams {
    pub session_id: String,
    pub question: String,
    pub rating: String,
}
