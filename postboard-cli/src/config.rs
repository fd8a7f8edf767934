use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use postboard_core::PostboardConfig;
use std::path::Path;

use crate::commands::load_config;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show config file path
    Path,
    /// Print the effective configuration as TOML
    Show,
    /// Write a config file with default values
    Init(InitArgs),
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

pub fn run_config(args: ConfigArgs, config_path: Option<&Path>) -> Result<()> {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(PostboardConfig::config_path);

    match args.command {
        ConfigCommands::Path => run_path(&path),
        ConfigCommands::Show => run_show(&path),
        ConfigCommands::Init(args) => run_init(&path, args),
    }
}

fn run_path(path: &Path) -> Result<()> {
    println!("{}", path.display());
    Ok(())
}

fn run_show(path: &Path) -> Result<()> {
    let config = load_config(Some(path))?;
    print!("{}", config.to_toml()?);
    Ok(())
}

fn run_init(path: &Path, args: InitArgs) -> Result<()> {
    PostboardConfig::default()
        .write_to(path, args.force)
        .with_context(|| {
            if args.force {
                format!("Failed to write config to {}", path.display())
            } else {
                format!(
                    "Could not create config at {}\n\nUse --force to overwrite",
                    path.display()
                )
            }
        })?;

    println!("✓ Config written to {}", path.display());
    Ok(())
}
