//! HTTP server command

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use postboard_server::db::create_pool_with_options;
use postboard_server::{run_server, ServerConfig};

use super::load_config;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (overrides config; default 127.0.0.1:8000)
    #[arg(long, short = 'b', env = "POSTBOARD_BIND")]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides config)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Directory served under /static (overrides config)
    #[arg(long, value_name = "DIR")]
    pub static_dir: Option<PathBuf>,

    /// Directory served under /media (overrides config)
    #[arg(long, value_name = "DIR")]
    pub media_dir: Option<PathBuf>,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;

    let mut server_config =
        ServerConfig::from_config(&config).context("Invalid [server] section in config")?;
    if let Some(bind) = args.bind {
        server_config.bind_addr = bind;
    }
    if args.cors_permissive {
        server_config.cors_permissive = true;
    }
    if let Some(dir) = args.static_dir {
        server_config.static_dir = dir;
    }
    if let Some(dir) = args.media_dir {
        server_config.media_dir = dir;
    }

    let database_url = args.database_url.unwrap_or(config.database.url);
    tracing::info!("Starting postboard server on {}", server_config.bind_addr);
    tracing::debug!(database_url = %database_url, "Opening database");

    let pool = create_pool_with_options(&database_url, config.database.max_connections)
        .await
        .context("Failed to create database pool")?;

    // Run server (blocks until shutdown)
    run_server(pool, server_config)
        .await
        .context("Server error")?;

    Ok(())
}
