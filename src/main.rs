//! Database Schema Provisioning Service
//!
//! A small web service that verifies connectivity to a user-supplied
//! Postgres database, generates schema for selected feature modules, and
//! executes it against the target on the user's behalf.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request        ┌──────────────────────────────────────────────┐
//!     ──────────────────────┼─▶ http/server ─▶ rate_limit ─▶ allowlist     │
//!                           │                     │               │        │
//!                           │                     ▼               ▼        │
//!                           │                  429 deny       403 deny     │
//!                           │                                              │
//!                           │   handlers ─▶ sqlgen (features → DDL)        │
//!     Client Response       │       │                                      │
//!     ◀─────────────────────┼───────┴──▶ db/executor ────────────────────▶ │──── Target
//!                           │            (ping / batch execute)            │     Postgres
//!                           └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use schema_provisioner::config::load_config;
use schema_provisioner::observability::{logging, metrics};
use schema_provisioner::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "schema-provisioner")]
#[command(about = "Provision feature schemas onto remote Postgres databases", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = load_config(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    logging::init(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        allowed_suffixes = ?config.allowlist.suffixes,
        rate_limit = config.rate_limit.max_requests,
        window_secs = config.rate_limit.window_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
