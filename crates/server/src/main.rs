// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! assigncald: REST backend for tracking academic assignments.
//!
//! Serves the assignment CRUD API over HTTP, backed by either an embedded
//! SQLite database or a MongoDB collection.

mod config;
mod env;
mod error;
mod server;
#[cfg(test)]
mod server_tests;
mod state;

use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::{info, warn};

use ac_core::build_store;
use state::ServerState;

/// assigncald: Assignment tracker API server
#[derive(Parser, Debug)]
#[command(name = "assigncald")]
#[command(about = "REST backend for tracking academic assignments")]
pub(crate) struct Args {
    /// Path to a TOML config file (also read from ASSIGNCAL_CONFIG)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind the server to [default: 0.0.0.0:8000]
    #[arg(short, long)]
    bind: Option<SocketAddr>,

    /// Storage backend
    #[arg(long, value_enum)]
    backend: Option<Backend>,

    /// SQLite database file
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// MongoDB connection string (also read from ASSIGNCAL_MONGO_URI)
    #[arg(long)]
    mongo_uri: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Storage backend choice on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Backend {
    Sqlite,
    Mongodb,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Initialize logging
    setup_logging(args.verbose);

    let config = config::resolve(&args)?;

    info!("Starting assigncald");
    info!("  Bind address: {}", config.bind);
    info!("  Store backend: {}", config.store.backend());

    let store = build_store(&config.store);
    // Connect up front so a bad store fails at startup, not on first request
    store.open().await?;

    let state = ServerState::new(store.clone());
    let result = server::run(config.bind, state, shutdown_signal()).await;

    if let Err(e) = store.close().await {
        warn!("failed to close store: {}", e);
    }
    info!("assigncald stopped");

    result
}

fn setup_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env(env::names::RUST_LOG)
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("received signal, shutting down");
}
