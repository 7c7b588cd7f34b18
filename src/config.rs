//! Gateway configuration
//!
//! One binary serves every deployment variant; the registered
//! `search_*` methods follow the configured collection list. Settings
//! load from an optional TOML file with `ANAMNESIS_`-prefixed
//! environment overrides.

use crate::error::Result;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Runtime configuration for one gateway instance
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address, e.g. "0.0.0.0:8080"
    pub addr: String,

    /// Collections to expose as `search_<name>` methods
    pub collections: Vec<String>,

    /// Result count when a search request omits `k`
    pub default_k: usize,

    /// Upper bound on one document-index query
    pub search_timeout_ms: u64,

    /// Base URL of the index sidecar; absent means fixture mode
    pub index_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:8080".to_string(),
            collections: vec!["documents".to_string()],
            default_k: 3,
            search_timeout_ms: 10_000,
            index_url: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from an optional file plus the environment
    ///
    /// Environment variables use the `ANAMNESIS_` prefix and override
    /// file values; `ANAMNESIS_COLLECTIONS` takes a comma-separated
    /// list.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix("ANAMNESIS")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("collections"),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Search timeout as a Duration
    pub fn search_timeout(&self) -> Duration {
        Duration::from_millis(self.search_timeout_ms)
    }
}
