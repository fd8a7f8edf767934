//! Command implementations for the postboard CLI

pub mod migrate;
pub mod serve;

use std::path::Path;

use anyhow::{Context, Result};
use postboard_core::PostboardConfig;

pub use migrate::run_migrate;
pub use serve::run_serve;

/// Load the config file named on the command line, or the default one.
pub fn load_config(path: Option<&Path>) -> Result<PostboardConfig> {
    let config = match path {
        Some(path) => PostboardConfig::load_from(path),
        None => PostboardConfig::load(),
    };
    config.context("Failed to load postboard config")
}
