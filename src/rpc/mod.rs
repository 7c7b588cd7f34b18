//! MCP request dispatch
//!
//! JSON-RPC envelope types, the startup-built method registry, typed
//! per-method parameter contracts, and the dispatcher that ties them to
//! the stores and the document index.

pub mod dispatcher;
pub mod params;
pub mod protocol;
pub mod registry;

pub use dispatcher::Dispatcher;
pub use protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
pub use registry::{MethodKind, MethodRegistry};
