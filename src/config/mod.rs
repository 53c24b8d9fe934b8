pub mod model;

use std::path::{Path, PathBuf};
use thiserror::Error;

pub use model::{AppConfig, CountdownSettings, LoggingConfig, UiConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config from {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    #[error("invalid deadline {value:?}, expected RFC 3339")]
    InvalidDeadline {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("crabclock")
        .join("config.toml")
}

pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_from(&config_path())
}

/// Load a config file, falling back to defaults when it does not exist.
pub fn load_from(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&contents)?)
}
