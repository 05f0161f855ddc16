// ABOUTME: Production server binary for the liftlog workout tracking API
// ABOUTME: Loads configuration, opens the database, and serves HTTP until shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Liftlog Server Binary
//!
//! Starts the HTTP API with environment-driven configuration. All settings
//! come from the environment (`HTTP_PORT`, `DATABASE_URL`, `BASE_URL`,
//! `JWT_SECRET`, `DISABLE_RATE_LIMIT`); the port can also be overridden on
//! the command line.

use anyhow::Result;
use clap::Parser;
use liftlog::config::ServerConfig;
use liftlog::database::Database;
use liftlog::logging::LoggingConfig;
use liftlog::routes::{router, ServerContext};
use std::net::SocketAddr;
use tracing::info;

#[derive(Parser)]
#[command(name = "liftlog-server")]
#[command(about = "Liftlog - workout tracking REST API")]
struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    LoggingConfig::from_env().init()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url {
        config.database_url = database_url;
    }
    config.validate()?;

    info!("Starting liftlog server on port {}", config.http_port);
    if !config.rate_limit.enabled {
        tracing::warn!("Rate limiting is disabled");
    }

    let database = Database::new(&config.database_url).await?;
    info!("Database initialized: {}", config.database_url);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {addr}");

    let app = router(ServerContext::new(config, database));
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
}
