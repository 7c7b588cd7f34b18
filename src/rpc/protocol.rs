//! JSON-RPC envelope types
//!
//! Defines the wire-level request/response wrappers for the MCP
//! endpoint. A response carries exactly one of `result` or `error`;
//! the absent field is omitted from the serialized form.

use serde::{Deserialize, Serialize};
use serde_json::Value;

fn default_request_id() -> Value {
    Value::from(1)
}

fn default_params() -> Value {
    Value::Object(serde_json::Map::new())
}

/// JSON-RPC request envelope
///
/// Every field is defaulted so a sparse body still parses: a missing
/// method dispatches as an unknown method, missing params validate as
/// empty, and a missing id falls back to the deterministic default `1`
/// so the response envelope is always complete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// Method name to invoke
    #[serde(default)]
    pub method: String,

    /// Method parameters
    #[serde(default = "default_params")]
    pub params: Value,

    /// Request ID (opaque, echoed back)
    #[serde(default = "default_request_id")]
    pub id: Value,
}

/// JSON-RPC response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// JSON-RPC version (always "2.0")
    pub jsonrpc: String,

    /// Result (present if successful)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,

    /// Error (present if failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,

    /// Request ID (echoed from request)
    pub id: Value,
}

impl JsonRpcResponse {
    /// Create a success response
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    /// Create an error response
    pub fn error(id: Value, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id,
        }
    }
}

/// JSON-RPC error object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// Error code
    pub code: i32,

    /// Error message
    pub message: String,
}

impl JsonRpcError {
    /// Parse error (-32700)
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self {
            code: -32700,
            message: message.into(),
        }
    }

    /// Method not found (-32601)
    pub fn method_not_found(message: impl Into<String>) -> Self {
        Self {
            code: -32601,
            message: message.into(),
        }
    }

    /// Invalid params (-32602)
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self {
            code: -32602,
            message: message.into(),
        }
    }

    /// Search backend unavailable (-32000)
    pub fn search_unavailable(message: impl Into<String>) -> Self {
        Self {
            code: -32000,
            message: message.into(),
        }
    }

    /// Internal error (-32603)
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self {
            code: -32603,
            message: message.into(),
        }
    }
}
