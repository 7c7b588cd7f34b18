//! HTTP surface for the gateway
//!
//! A thin axum layer: the `/mcp` RPC endpoint plus read-only debug and
//! health routes. All protocol logic lives in the dispatcher.

pub mod server;

pub use server::ApiServer;
