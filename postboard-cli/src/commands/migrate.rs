//! Schema bootstrap without starting the server

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;

use postboard_server::db::{create_pool, migrations};

use super::load_config;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (overrides config)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

pub async fn run_migrate(args: MigrateArgs, config_path: Option<&Path>) -> Result<()> {
    let database_url = match args.database_url {
        Some(url) => url,
        None => load_config(config_path)?.database.url,
    };

    let pool = create_pool(&database_url)
        .await
        .context("Failed to create database pool")?;
    migrations::run(&pool).await.context("Migration failed")?;
    pool.close().await;

    println!("Database schema is up to date");
    Ok(())
}
