//! Core data types for the Anamnesis gateway
//!
//! Defines the records held by the in-memory stores (memory entries,
//! confidence logs, feedback logs) and the search result shape passed
//! through from the document index. Records are immutable once created;
//! the stores only ever append.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Score above which a response counts as high confidence
pub const HIGH_CONFIDENCE_THRESHOLD: f64 = 0.8;

/// Score below which a response counts as low confidence
pub const LOW_CONFIDENCE_THRESHOLD: f64 = 0.4;

/// Unique identifier for memory entries
///
/// Wraps a UUID to provide type safety and prevent mixing entry ids
/// with other UUID-based identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub Uuid);

impl EntryId {
    /// Create a new random entry ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry in a session's conversational memory
///
/// Timestamps within a session are monotonically non-decreasing; the
/// store clamps against the previous entry if the wall clock steps back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryEntry {
    /// Generated unique id
    pub id: EntryId,

    /// Opaque text payload
    pub text: String,

    /// Creation instant, assigned at insert time
    pub timestamp: DateTime<Utc>,
}

/// One logged confidence observation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfidenceRecord {
    pub timestamp: DateTime<Utc>,

    /// Query the response was produced for
    pub query: String,

    /// The response text being scored
    pub response: String,

    /// Caller-supplied score, stored without range validation
    pub confidence_score: f64,

    /// Derived: score > 0.8
    pub is_high_confidence: bool,

    /// Derived: score < 0.4
    pub is_low_confidence: bool,
}

impl ConfidenceRecord {
    /// Build a record, deriving the confidence flags from the score
    pub fn new(query: String, response: String, confidence_score: f64) -> Self {
        Self {
            timestamp: Utc::now(),
            query,
            response,
            confidence_score,
            is_high_confidence: confidence_score > HIGH_CONFIDENCE_THRESHOLD,
            is_low_confidence: confidence_score < LOW_CONFIDENCE_THRESHOLD,
        }
    }
}

/// One logged user-feedback observation
///
/// The rating is stored verbatim; `thumbs_up` and `thumbs_down` are the
/// values well-behaved clients send.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub timestamp: DateTime<Utc>,
    pub session_id: String,
    pub question: String,
    pub rating: String,
}

/// Known feedback rating values
pub const KNOWN_RATINGS: [&str; 2] = ["thumbs_up", "thumbs_down"];

/// One search result from the document index
///
/// Metadata is an opaque string-to-scalar mapping, passed through
/// untouched. BTreeMap keeps dump output stable across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// Document text
    pub text: String,

    /// Opaque document metadata
    #[serde(default)]
    pub meta: BTreeMap<String, Value>,
}
