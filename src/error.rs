//! Error types for the Anamnesis gateway
//!
//! This module provides structured error handling using thiserror for
//! error definitions and anyhow for propagation from helper code.

use thiserror::Error;

/// Main error type for Anamnesis operations
#[derive(Error, Debug)]
pub enum AnamnesisError {
    /// Client invoked a method name that is not registered
    #[error("Method not found: {0}")]
    UnknownMethod(String),

    /// Required parameter missing, empty, or wrong shape
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    /// The document index could not be reached or timed out
    #[error("Search unavailable: {0}")]
    SearchUnavailable(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Unexpected failure inside a handler
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Anamnesis operations
pub type Result<T> = std::result::Result<T, AnamnesisError>;

/// Convert anyhow::Error to AnamnesisError
impl From<anyhow::Error> for AnamnesisError {
    fn from(err: anyhow::Error) -> Self {
        AnamnesisError::Internal(err.to_string())
    }
}
