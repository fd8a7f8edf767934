//! postboard CLI - run and administer the postboard blog server
//!
//! - `serve`: start the HTTP server (JSON API + rendered pages)
//! - `migrate`: create the database schema without serving
//! - `config`: inspect or initialise the config file

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "postboard",
    author,
    version,
    about = "A small blog server: users, posts, a JSON API and rendered pages"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG still takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    /// Config file (default: $POSTBOARD_CONFIG or ~/.postboard/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve(commands::serve::ServeArgs),
    /// Create or update the database schema and exit
    Migrate(commands::migrate::MigrateArgs),
    /// Manage postboard configuration (path, show, init)
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug })?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Serve(args) => commands::run_serve(args, config_path).await?,
        Commands::Migrate(args) => commands::run_migrate(args, config_path).await?,
        Commands::Config(args) => config::run_config(args, config_path)?,
    }
    Ok(())
}
