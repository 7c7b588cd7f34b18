//! Confidence and feedback telemetry logs
//!
//! Two independent append-only logs used for read-only inspection via
//! the debug endpoints. Logging never fails; records are immutable.

use crate::types::{ConfidenceRecord, FeedbackRecord, KNOWN_RATINGS};
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Append-only telemetry store
pub struct TelemetryStore {
    confidence: RwLock<Vec<ConfidenceRecord>>,
    feedback: RwLock<Vec<FeedbackRecord>>,
}

impl TelemetryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            confidence: RwLock::new(Vec::new()),
            feedback: RwLock::new(Vec::new()),
        }
    }

    /// Append a confidence record, deriving the high/low flags
    pub async fn log_confidence(
        &self,
        query: &str,
        response: &str,
        score: f64,
    ) -> ConfidenceRecord {
        let record = ConfidenceRecord::new(query.to_string(), response.to_string(), score);

        let mut log = self.confidence.write().await;
        log.push(record.clone());
        debug!(score, total = log.len(), "confidence record logged");
        record
    }

    /// Append a feedback record
    ///
    /// The rating is stored verbatim. Unknown values are accepted (the
    /// wire contract predates validation) but logged so misbehaving
    /// clients are visible to operators.
    pub async fn log_feedback(
        &self,
        session_id: &str,
        question: &str,
        rating: &str,
    ) -> FeedbackRecord {
        if !KNOWN_RATINGS.contains(&rating) {
            warn!(session_id, rating, "unknown feedback rating stored verbatim");
        }

        let record = FeedbackRecord {
            timestamp: Utc::now(),
            session_id: session_id.to_string(),
            question: question.to_string(),
            rating: rating.to_string(),
        };

        let mut log = self.feedback.write().await;
        log.push(record.clone());
        debug!(session_id, total = log.len(), "feedback record logged");
        record
    }

    /// Snapshot of the confidence log
    pub async fn dump_confidence(&self) -> Vec<ConfidenceRecord> {
        let log = self.confidence.read().await;
        log.clone()
    }

    /// Snapshot of the feedback log
    pub async fn dump_feedback(&self) -> Vec<FeedbackRecord> {
        let log = self.feedback.read().await;
        log.clone()
    }

    /// Number of confidence records
    pub async fn confidence_count(&self) -> usize {
        self.confidence.read().await.len()
    }

    /// Number of feedback records
    pub async fn feedback_count(&self) -> usize {
        self.feedback.read().await.len()
    }
}

impl Default for TelemetryStore {
    fn default() -> Self {
        Self::new()
    }
}
