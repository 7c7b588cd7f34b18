//! Session-scoped conversational memory
//!
//! Keyed by caller-supplied session id; each session holds an ordered,
//! append-only log of text entries. Sessions are created lazily on first
//! insert and never deleted.

use crate::error::{AnamnesisError, Result};
use crate::types::{EntryId, MemoryEntry};
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// Per-session append-only memory log
pub struct MemoryStore {
    sessions: RwLock<HashMap<String, Vec<MemoryEntry>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Append a new entry to a session, creating the session if absent
    ///
    /// Fails with `InvalidParams` if either argument is empty. Returns
    /// the created entry.
    pub async fn insert(&self, session_id: &str, text: &str) -> Result<MemoryEntry> {
        if session_id.is_empty() {
            return Err(AnamnesisError::InvalidParams(
                "session_id must not be empty".to_string(),
            ));
        }
        if text.is_empty() {
            return Err(AnamnesisError::InvalidParams(
                "text must not be empty".to_string(),
            ));
        }

        let mut sessions = self.sessions.write().await;
        let entries = sessions.entry(session_id.to_string()).or_default();

        // Timestamps never decrease within a session, even if the wall
        // clock steps backwards between inserts.
        let mut timestamp = Utc::now();
        if let Some(last) = entries.last() {
            if last.timestamp > timestamp {
                timestamp = last.timestamp;
            }
        }

        let entry = MemoryEntry {
            id: EntryId::new(),
            text: text.to_string(),
            timestamp,
        };
        entries.push(entry.clone());

        debug!(
            session_id,
            entry_id = %entry.id,
            total = entries.len(),
            "memory entry inserted"
        );
        Ok(entry)
    }

    /// Fetch a session's entries in insertion order
    ///
    /// An unknown session id yields an empty vec; "no memory yet" is a
    /// normal state, not an error.
    pub async fn fetch(&self, session_id: &str) -> Vec<MemoryEntry> {
        let sessions = self.sessions.read().await;
        sessions.get(session_id).cloned().unwrap_or_default()
    }

    /// Snapshot of the full store for inspection
    pub async fn dump(&self) -> HashMap<String, Vec<MemoryEntry>> {
        let sessions = self.sessions.read().await;
        sessions.clone()
    }

    /// Number of sessions
    pub async fn session_count(&self) -> usize {
        let sessions = self.sessions.read().await;
        sessions.len()
    }

    /// Total number of entries across all sessions
    pub async fn entry_count(&self) -> usize {
        let sessions = self.sessions.read().await;
        sessions.values().map(Vec::len).sum()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}
