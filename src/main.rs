//! Cookie demo server.
//!
//! Serves a handful of routes whose cookies are declared in a registry
//! (built-in, extended by the `[[routes]]` of an optional TOML config) and
//! queued by handlers at request time.
//!
//! ```text
//! POST /login?user=NAME        session (dynamic) + visited (static)
//! POST /logout                 clears session (static, name only)
//! GET  /whoami                 reads plain and signed cookies
//! PUT  /preferences/{theme}    theme: dynamic value shadows the static one
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use route_cookies::config::{load_config, AppConfig};
use route_cookies::observability::logging;
use route_cookies::HttpServer;

#[derive(Parser)]
#[command(name = "route-cookies")]
#[command(about = "Demo server for declarative route cookies", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init(&config.logging)?;

    tracing::info!(
        config = ?cli.config,
        bind_address = %config.listener.bind_address,
        routes = config.routes.len(),
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = HttpServer::new(config)?;
    server.run(listener, shutdown_signal()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
