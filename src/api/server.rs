//! HTTP API server
//!
//! Routes:
//! - `POST /mcp` — the JSON-RPC endpoint
//! - `GET /debug/memory`, `/debug/confidence`, `/debug/feedback` —
//!   verbatim store dumps, bypassing method dispatch
//! - `GET /health` — status, registered methods, store counts
//!
//! The RPC body is read as a raw string so that malformed JSON still
//! yields a well-formed error envelope instead of a framework 400.

use crate::config::ServerConfig;
use crate::error::Result;
use crate::index::DocumentIndex;
use crate::rpc::{Dispatcher, JsonRpcError, JsonRpcRequest, JsonRpcResponse, MethodRegistry};
use crate::store::{MemoryStore, TelemetryStore};
use crate::types::{ConfidenceRecord, FeedbackRecord, MemoryEntry};
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info};

/// Shared per-request state
#[derive(Clone)]
struct AppState {
    dispatcher: Arc<Dispatcher>,
    memory: Arc<MemoryStore>,
    telemetry: Arc<TelemetryStore>,
}

/// API server owning the dispatcher and stores
pub struct ApiServer {
    config: ServerConfig,
    state: AppState,
}

impl ApiServer {
    /// Wire up stores, registry, and dispatcher for one deployment
    pub fn new(config: ServerConfig, index: Arc<dyn DocumentIndex>) -> Self {
        let memory = Arc::new(MemoryStore::new());
        let telemetry = Arc::new(TelemetryStore::new());

        let registry = MethodRegistry::new(&config.collections);
        let dispatcher = Arc::new(Dispatcher::new(
            registry,
            index,
            memory.clone(),
            telemetry.clone(),
            config.default_k,
            config.search_timeout(),
        ));

        Self {
            config,
            state: AppState {
                dispatcher,
                memory,
                telemetry,
            },
        }
    }

    /// Build the router
    fn build_router(state: AppState) -> Router {
        Router::new()
            // RPC endpoint
            .route("/mcp", post(mcp_handler))
            // Inspection endpoints, read directly from the stores
            .route("/debug/memory", get(debug_memory_handler))
            .route("/debug/confidence", get(debug_confidence_handler))
            .route("/debug/feedback", get(debug_feedback_handler))
            // Health check
            .route("/health", get(health_handler))
            // State
            .with_state(state)
            // Middleware
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
    }

    /// Bind and serve until the process is stopped
    pub async fn serve(self) -> Result<()> {
        let addr: SocketAddr = self.config.addr.parse().map_err(|e| {
            anyhow::anyhow!("invalid bind address '{}': {}", self.config.addr, e)
        })?;

        let router = Self::build_router(self.state);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("MCP gateway listening on http://{}", addr);
        axum::serve(listener, router).await?;
        Ok(())
    }
}

/// RPC endpoint handler
async fn mcp_handler(State(state): State<AppState>, body: String) -> Json<JsonRpcResponse> {
    let request: JsonRpcRequest = match serde_json::from_str(&body) {
        Ok(request) => request,
        Err(e) => {
            debug!("unparseable request body: {e}");
            // No id is recoverable from a broken body; use the same
            // deterministic default the envelope parser applies.
            return Json(JsonRpcResponse::error(
                Value::from(1),
                JsonRpcError::parse_error(format!("Invalid JSON: {e}")),
            ));
        }
    };

    Json(state.dispatcher.dispatch(request).await)
}

/// Memory store dump
async fn debug_memory_handler(
    State(state): State<AppState>,
) -> Json<HashMap<String, Vec<MemoryEntry>>> {
    Json(state.memory.dump().await)
}

/// Confidence log dump
async fn debug_confidence_handler(State(state): State<AppState>) -> Json<Vec<ConfidenceRecord>> {
    Json(state.telemetry.dump_confidence().await)
}

/// Feedback log dump
async fn debug_feedback_handler(State(state): State<AppState>) -> Json<Vec<FeedbackRecord>> {
    Json(state.telemetry.dump_feedback().await)
}

/// Health check handler
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    methods: Vec<String>,
    sessions: usize,
    memory_entries: usize,
    confidence_records: usize,
    feedback_records: usize,
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        methods: state.dispatcher.method_names(),
        sessions: state.memory.session_count().await,
        memory_entries: state.memory.entry_count().await,
        confidence_records: state.telemetry.confidence_count().await,
        feedback_records: state.telemetry.feedback_count().await,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::FixtureIndex;
    use serde_json::json;

    fn test_state() -> AppState {
        let config = ServerConfig {
            collections: vec!["pdfs".to_string()],
            ..Default::default()
        };
        let server = ApiServer::new(config, Arc::new(FixtureIndex::new()));
        server.state
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = health_handler(State(test_state())).await;
        assert_eq!(response.0.status, "ok");
        assert!(response.0.methods.contains(&"search_pdfs".to_string()));
        assert_eq!(response.0.sessions, 0);
    }

    #[tokio::test]
    async fn test_mcp_handler_parse_error_envelope() {
        let response = mcp_handler(State(test_state()), "{not json".to_string()).await;

        let error = response.0.error.unwrap();
        assert_eq!(error.code, -32700);
        assert_eq!(response.0.id, json!(1));
        assert!(response.0.result.is_none());
    }

    #[tokio::test]
    async fn test_mcp_handler_dispatches() {
        let state = test_state();
        let body = r#"{"method":"insert_memory","params":{"session_id":"s1","text":"hi"},"id":9}"#;

        let response = mcp_handler(State(state.clone()), body.to_string()).await;
        assert_eq!(response.0.result, Some(json!("Memory inserted")));
        assert_eq!(response.0.id, json!(9));

        let dump = debug_memory_handler(State(state)).await;
        assert_eq!(dump.0["s1"].len(), 1);
    }

    #[tokio::test]
    async fn test_debug_dumps_start_empty() {
        let state = test_state();
        assert!(debug_memory_handler(State(state.clone())).await.0.is_empty());
        assert!(debug_confidence_handler(State(state.clone())).await.0.is_empty());
        assert!(debug_feedback_handler(State(state)).await.0.is_empty());
    }
}
