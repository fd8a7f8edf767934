/// Structured error types for postboard-core.
///
/// The CLI wraps these with `anyhow` context; the server only sees them at
/// startup while loading configuration.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for postboard-core operations
#[derive(Error, Debug)]
pub enum CoreError {
    /// Config file exists but could not be read or written
    #[error("Failed to access config file {path:?}: {source}")]
    ConfigIo { path: PathBuf, source: io::Error },

    /// Config file is not valid TOML for [`crate::PostboardConfig`]
    #[error("Invalid config file {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Config could not be rendered back to TOML
    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Config file already present and overwrite was not requested
    #[error("Config already exists at {path:?}")]
    ConfigExists { path: PathBuf },
}

/// Result type alias for postboard-core operations
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    pub fn config_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::ConfigIo {
            path: path.into(),
            source,
        }
    }

    pub fn config_parse(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::ConfigParse {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::ConfigExists {
            path: PathBuf::from("/tmp/config.toml"),
        };
        assert!(err.to_string().contains("/tmp/config.toml"));

        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err = CoreError::config_io("/etc/postboard.toml", io_err);
        assert!(err.to_string().contains("Failed to access config file"));
    }
}
