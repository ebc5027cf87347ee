//! Signature Store Service
//!
//! Serves a JSON CRUD API over an in-memory collection of signatures.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin signature-store -- --config config/signature_store.toml
//! ```
//!
//! Or set the config path via environment variable:
//!
//! ```bash
//! SIGNATURE_STORE_CONFIG_PATH=config/signature_store.toml cargo run --bin signature-store
//! ```

use anyhow::Result;
use clap::Parser;
use signature_store::{ApiServer, Config};
use tokio::signal;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "signature-store")]
#[command(about = "In-memory signature store with a JSON CRUD API")]
struct Args {
    /// Path to configuration file (default: config/signature_store.toml or SIGNATURE_STORE_CONFIG_PATH env var)
    #[arg(short, long)]
    config: Option<String>,

    /// Port to listen on (overrides api.port from the config file)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments first (before initializing logging)
    let args = Args::parse();

    tracing_subscriber::fmt::init();

    info!("Starting Signature Store Service");

    let mut config = Config::load_from_path(args.config.as_deref())?;
    if let Some(port) = args.port {
        info!("Overriding configured port with {}", port);
        config.api.port = port;
        config.validate()?;
    }
    info!("Configuration loaded successfully");

    let api_server = ApiServer::new(config);

    let shutdown = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for shutdown signal: {}", e);
            // Keep serving; the process can still be killed externally.
            std::future::pending::<()>().await;
        }
        info!("Received shutdown signal, stopping service...");
    };

    api_server.run(shutdown).await?;

    info!("Signature Store Service stopped");
    Ok(())
}
