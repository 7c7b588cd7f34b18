//! Anamnesis - MCP retrieval gateway entry point
//!
//! Starts one gateway instance; which `search_*` methods it exposes and
//! which port it binds follow the loaded configuration, so the historic
//! per-collection server variants are now one binary with different
//! config files.

use anamnesis::{
    error::Result, ApiServer, DocumentIndex, FixtureIndex, RemoteIndex, SearchHit, ServerConfig,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "anamnesis", version, about = "MCP retrieval gateway")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the gateway
    Serve {
        /// Path to a TOML config file
        #[arg(short, long, env = "ANAMNESIS_CONFIG")]
        config: Option<PathBuf>,

        /// Bind address override (e.g. 0.0.0.0:8002)
        #[arg(long)]
        addr: Option<String>,

        /// Serve canned fixture collections instead of a remote index
        #[arg(long)]
        fixture: bool,
    },
}

/// Build the document index for this deployment
fn build_index(config: &ServerConfig, fixture: bool) -> Result<Arc<dyn DocumentIndex>> {
    if fixture || config.index_url.is_none() {
        if !fixture {
            warn!("no index_url configured, falling back to fixture collections");
        }

        let mut index = FixtureIndex::new();
        for collection in &config.collections {
            let docs = (1..=config.default_k)
                .map(|i| SearchHit {
                    text: format!("Sample document {i} from collection '{collection}'"),
                    meta: Default::default(),
                })
                .collect();
            index = index.with_collection(collection.clone(), docs);
        }
        return Ok(Arc::new(index));
    }

    // Checked above
    let url = config.index_url.as_deref().unwrap_or_default();
    info!(url, "using remote document index");
    Ok(Arc::new(RemoteIndex::new(url, config.search_timeout())?))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            config,
            addr,
            fixture,
        } => {
            let mut config = ServerConfig::load(config.as_deref())?;
            if let Some(addr) = addr {
                config.addr = addr;
            }

            info!(
                addr = %config.addr,
                collections = ?config.collections,
                "starting MCP gateway"
            );

            let index = build_index(&config, fixture)?;
            let server = ApiServer::new(config, index);
            server.serve().await
        }
    }
}
