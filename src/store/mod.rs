//! In-memory stores shared across requests
//!
//! All three stores are process-wide, created at startup and injected
//! into the dispatcher behind `Arc`. They are append-only: entries are
//! never mutated or removed, and lifecycle ends with the process (no
//! persistence across restarts by design).

pub mod memory;
pub mod telemetry;

pub use memory::MemoryStore;
pub use telemetry::TelemetryStore;
