//! postboard configuration
//!
//! Loaded from `$POSTBOARD_CONFIG` or `~/.postboard/config.toml`. Every field
//! has a default, so a missing file is not an error. CLI flags and
//! environment variables are layered on top by the binary.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, Result};

/// Environment variable that points at an alternative config file
pub const CONFIG_ENV: &str = "POSTBOARD_CONFIG";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostboardConfig {
    pub server: ServerSection,
    pub database: DatabaseSection,
    pub assets: AssetsSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Address to bind to
    pub bind: String,
    /// Allow any CORS origin instead of localhost only
    pub cors_permissive: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8000".to_string(),
            cors_permissive: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    /// sqlx connection URL
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: "sqlite://postboard.db".to_string(),
            max_connections: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsSection {
    /// Served under /static
    pub static_dir: PathBuf,
    /// Served under /media (uploaded profile pictures)
    pub media_dir: PathBuf,
}

impl Default for AssetsSection {
    fn default() -> Self {
        Self {
            static_dir: PathBuf::from("static"),
            media_dir: PathBuf::from("media"),
        }
    }
}

impl PostboardConfig {
    /// Load from the default location, falling back to defaults when absent.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load a specific file; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| CoreError::config_io(path, e))?;
        let config = toml::from_str(&content).map_err(|e| CoreError::config_parse(path, e))?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Config file path: `$POSTBOARD_CONFIG` or `~/.postboard/config.toml`
    pub fn config_path() -> PathBuf {
        if let Ok(path) = env::var(CONFIG_ENV) {
            return PathBuf::from(path);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".postboard/config.toml")
    }

    /// Render as TOML (used by `config show` and `config init`).
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write this config to `path`, creating parent directories.
    ///
    /// Refuses to overwrite an existing file unless `force` is set.
    pub fn write_to(&self, path: &Path, force: bool) -> Result<()> {
        if path.exists() && !force {
            return Err(CoreError::ConfigExists {
                path: path.to_path_buf(),
            });
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| CoreError::config_io(parent, e))?;
        }
        fs::write(path, self.to_toml()?).map_err(|e| CoreError::config_io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = PostboardConfig::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, PostboardConfig::default());
        assert_eq!(config.server.bind, "127.0.0.1:8000");
        assert_eq!(config.database.url, "sqlite://postboard.db");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
            [database]
            url = "sqlite::memory:"
            "#,
        )
        .unwrap();

        let config = PostboardConfig::load_from(&path).unwrap();
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.assets.static_dir, PathBuf::from("static"));
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[server\nbind = 1").unwrap();

        let err = PostboardConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, CoreError::ConfigParse { .. }));
    }

    #[test]
    fn write_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/config.toml");
        let mut config = PostboardConfig::default();
        config.server.cors_permissive = true;

        config.write_to(&path, false).unwrap();
        assert_eq!(PostboardConfig::load_from(&path).unwrap(), config);

        let err = config.write_to(&path, false).unwrap_err();
        assert!(matches!(err, CoreError::ConfigExists { .. }));
        config.write_to(&path, true).unwrap();
    }
}
