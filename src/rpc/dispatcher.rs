//! Request dispatcher
//!
//! The protocol boundary: resolves the method, validates typed
//! parameters, invokes the handler against the injected collaborators,
//! and converts every outcome — success or failure — into exactly one
//! response envelope. No error crosses this boundary unconverted.

use super::params::{
    FetchMemoryParams, InsertConfidenceParams, InsertFeedbackParams, InsertMemoryParams,
    SearchParams,
};
use super::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
use super::registry::{MethodKind, MethodRegistry};
use crate::error::{AnamnesisError, Result};
use crate::index::DocumentIndex;
use crate::store::{MemoryStore, TelemetryStore};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Confirmation payloads, bit-exact with the wire contract
const MEMORY_INSERTED: &str = "Memory inserted";
const CONFIDENCE_INSERTED: &str = "Confidence log inserted";
const FEEDBACK_INSERTED: &str = "Feedback inserted";

/// Dispatcher runtime context
///
/// Owns the method registry and holds the stores and index behind
/// `Arc`; one dispatcher serves all requests concurrently.
pub struct Dispatcher {
    registry: MethodRegistry,
    index: Arc<dyn DocumentIndex>,
    memory: Arc<MemoryStore>,
    telemetry: Arc<TelemetryStore>,
    default_k: usize,
    search_timeout: Duration,
}

impl Dispatcher {
    /// Create a dispatcher wired to its collaborators
    pub fn new(
        registry: MethodRegistry,
        index: Arc<dyn DocumentIndex>,
        memory: Arc<MemoryStore>,
        telemetry: Arc<TelemetryStore>,
        default_k: usize,
        search_timeout: Duration,
    ) -> Self {
        Self {
            registry,
            index,
            memory,
            telemetry,
            default_k,
            search_timeout,
        }
    }

    /// Registered method names, for the health endpoint
    pub fn method_names(&self) -> Vec<String> {
        self.registry.method_names()
    }

    /// Dispatch one request, always producing a well-formed response
    pub async fn dispatch(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.clone();
        debug!(method = %request.method, "dispatching request");

        match self.handle(&request).await {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(err) => {
                warn!(method = %request.method, error = %err, "request failed");
                JsonRpcResponse::error(id, wire_error(&err))
            }
        }
    }

    async fn handle(&self, request: &JsonRpcRequest) -> Result<Value> {
        let kind = self
            .registry
            .resolve(&request.method)
            .ok_or_else(|| AnamnesisError::UnknownMethod(request.method.clone()))?;

        match kind {
            MethodKind::Search { collection } => {
                let p: SearchParams = parse_params(&request.params)?;
                self.search(collection, &p).await
            }
            MethodKind::InsertMemory => {
                let p: InsertMemoryParams = parse_params(&request.params)?;
                self.memory.insert(&p.session_id, &p.text).await?;
                Ok(Value::from(MEMORY_INSERTED))
            }
            MethodKind::FetchMemory => {
                let p: FetchMemoryParams = parse_params(&request.params)?;
                let entries = self.memory.fetch(&p.session_id).await;
                Ok(serde_json::to_value(entries)?)
            }
            MethodKind::InsertConfidence => {
                let p: InsertConfidenceParams = parse_params(&request.params)?;
                self.telemetry
                    .log_confidence(&p.query, &p.response, p.confidence_score)
                    .await;
                Ok(Value::from(CONFIDENCE_INSERTED))
            }
            MethodKind::InsertFeedback => {
                let p: InsertFeedbackParams = parse_params(&request.params)?;
                self.telemetry
                    .log_feedback(&p.session_id, &p.question, &p.rating)
                    .await;
                Ok(Value::from(FEEDBACK_INSERTED))
            }
        }
    }

    /// Search proxy: one bounded index call, ordering passed through
    async fn search(&self, collection: &str, params: &SearchParams) -> Result<Value> {
        let k = params.k.unwrap_or(self.default_k);

        let hits = timeout(
            self.search_timeout,
            self.index.query(collection, &params.query, k),
        )
        .await
        .map_err(|_| {
            AnamnesisError::SearchUnavailable(format!(
                "index query for '{collection}' timed out after {:?}",
                self.search_timeout
            ))
        })??;

        Ok(serde_json::to_value(hits)?)
    }
}

/// Deserialize a method's typed parameters, centralizing InvalidParams
fn parse_params<T: DeserializeOwned>(params: &Value) -> Result<T> {
    serde_json::from_value(params.clone())
        .map_err(|e| AnamnesisError::InvalidParams(e.to_string()))
}

/// Map the error taxonomy onto wire error codes
fn wire_error(err: &AnamnesisError) -> JsonRpcError {
    match err {
        AnamnesisError::UnknownMethod(_) => JsonRpcError::method_not_found(err.to_string()),
        AnamnesisError::InvalidParams(_) => JsonRpcError::invalid_params(err.to_string()),
        AnamnesisError::SearchUnavailable(_) => JsonRpcError::search_unavailable(err.to_string()),
        _ => JsonRpcError::internal_error(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::FixtureIndex;
    use crate::types::SearchHit;
    use async_trait::async_trait;
    use serde_json::json;

    fn hit(text: &str) -> SearchHit {
        SearchHit {
            text: text.to_string(),
            meta: Default::default(),
        }
    }

    fn dispatcher_with_index(index: Arc<dyn DocumentIndex>) -> Dispatcher {
        Dispatcher::new(
            MethodRegistry::new(&["company_info".to_string()]),
            index,
            Arc::new(MemoryStore::new()),
            Arc::new(TelemetryStore::new()),
            3,
            Duration::from_millis(200),
        )
    }

    fn dispatcher() -> Dispatcher {
        let index = FixtureIndex::new().with_collection(
            "company_info",
            vec![hit("about us"), hit("locations"), hit("history"), hit("staff")],
        );
        dispatcher_with_index(Arc::new(index))
    }

    fn request(method: &str, params: Value) -> JsonRpcRequest {
        JsonRpcRequest {
            method: method.to_string(),
            params,
            id: json!(1),
        }
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let response = dispatcher()
            .dispatch(request("search_unknown", json!({"query": "q"})))
            .await;

        assert!(response.result.is_none());
        assert_eq!(response.error.unwrap().code, -32601);
        assert_eq!(response.id, json!(1));
    }

    #[tokio::test]
    async fn test_insert_memory_missing_params() {
        let response = dispatcher().dispatch(request("insert_memory", json!({}))).await;

        assert!(response.result.is_none());
        assert_eq!(response.error.unwrap().code, -32602);
    }

    #[tokio::test]
    async fn test_insert_memory_empty_field_rejected() {
        let response = dispatcher()
            .dispatch(request("insert_memory", json!({"session_id": "s1", "text": ""})))
            .await;

        assert_eq!(response.error.unwrap().code, -32602);
    }

    #[tokio::test]
    async fn test_insert_then_fetch_roundtrip() {
        let d = dispatcher();

        let response = d
            .dispatch(request(
                "insert_memory",
                json!({"session_id": "s1", "text": "hello"}),
            ))
            .await;
        assert_eq!(response.result, Some(json!("Memory inserted")));
        assert!(response.error.is_none());

        let response = d
            .dispatch(request("fetch_memory", json!({"session_id": "s1"})))
            .await;
        let entries = response.result.unwrap();
        assert_eq!(entries.as_array().unwrap().len(), 1);
        assert_eq!(entries[0]["text"], "hello");
    }

    #[tokio::test]
    async fn test_fetch_unknown_session_is_empty_result() {
        let response = dispatcher()
            .dispatch(request("fetch_memory", json!({"session_id": "nope"})))
            .await;

        assert!(response.error.is_none());
        assert_eq!(response.result, Some(json!([])));
    }

    #[tokio::test]
    async fn test_search_defaults_k() {
        let response = dispatcher()
            .dispatch(request("search_company_info", json!({"query": "offices"})))
            .await;

        let hits = response.result.unwrap();
        assert_eq!(hits.as_array().unwrap().len(), 3);
        assert_eq!(hits[0]["text"], "about us");
    }

    #[tokio::test]
    async fn test_search_explicit_k() {
        let response = dispatcher()
            .dispatch(request("search_company_info", json!({"query": "offices", "k": 1})))
            .await;

        assert_eq!(response.result.unwrap().as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_search_missing_query_invalid_params() {
        let response = dispatcher()
            .dispatch(request("search_company_info", json!({"k": 2})))
            .await;

        assert_eq!(response.error.unwrap().code, -32602);
    }

    #[tokio::test]
    async fn test_search_unknown_collection_maps_to_unavailable() {
        // Registry knows the method but the index lacks the collection
        let d = dispatcher_with_index(Arc::new(FixtureIndex::new()));

        let response = d
            .dispatch(request("search_company_info", json!({"query": "q"})))
            .await;
        assert_eq!(response.error.unwrap().code, -32000);
    }

    struct StalledIndex;

    #[async_trait]
    impl DocumentIndex for StalledIndex {
        async fn query(&self, _: &str, _: &str, _: usize) -> crate::error::Result<Vec<SearchHit>> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn test_search_timeout_is_search_unavailable() {
        let d = dispatcher_with_index(Arc::new(StalledIndex));

        let response = d
            .dispatch(request("search_company_info", json!({"query": "q"})))
            .await;
        let error = response.error.unwrap();
        assert_eq!(error.code, -32000);
        assert!(error.message.contains("timed out"));
    }

    #[tokio::test]
    async fn test_confidence_and_feedback_confirmations() {
        let d = dispatcher();

        let response = d
            .dispatch(request(
                "insert_confidence",
                json!({"query": "q", "response": "r", "confidence_score": 0.9}),
            ))
            .await;
        assert_eq!(response.result, Some(json!("Confidence log inserted")));

        let response = d
            .dispatch(request(
                "insert_feedback",
                json!({"session_id": "s1", "question": "q", "rating": "thumbs_down"}),
            ))
            .await;
        assert_eq!(response.result, Some(json!("Feedback inserted")));
    }

    #[tokio::test]
    async fn test_id_echoed_for_errors() {
        let d = dispatcher();
        let req = JsonRpcRequest {
            method: "bogus".to_string(),
            params: json!({}),
            id: json!({"nested": ["id", 42]}),
        };

        let response = d.dispatch(req).await;
        assert_eq!(response.id, json!({"nested": ["id", 42]}));
    }
}
