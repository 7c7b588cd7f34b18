//! Anamnesis - MCP Retrieval Gateway
//!
//! A JSON-RPC ("MCP") gateway over HTTP that lets a calling agent:
//! - run similarity search across named document collections,
//! - persist and retrieve per-session conversational memory,
//! - log response-confidence and user-feedback telemetry.
//!
//! # Architecture
//!
//! - **Types**: immutable records (memory entries, telemetry logs)
//! - **Store**: process-wide append-only stores with interior locking
//! - **Index**: `DocumentIndex` trait plus remote and fixture adapters
//! - **Rpc**: envelopes, method registry, and the dispatcher
//! - **Api**: thin axum layer (`/mcp`, `/debug/*`, `/health`)
//!
//! Deployment variants (different collection sets on different ports)
//! are configuration, not code: the registry derives one
//! `search_<collection>` method per configured collection.

pub mod api;
pub mod config;
pub mod error;
pub mod index;
pub mod rpc;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use api::ApiServer;
pub use config::ServerConfig;
pub use error::{AnamnesisError, Result};
pub use index::{DocumentIndex, FixtureIndex, RemoteIndex};
pub use rpc::{Dispatcher, JsonRpcError, JsonRpcRequest, JsonRpcResponse, MethodRegistry};
pub use store::{MemoryStore, TelemetryStore};
pub use types::{ConfidenceRecord, EntryId, FeedbackRecord, MemoryEntry, SearchHit};
