//! Application configuration.
//!
//! # Responsibility
//! - Load optional JSON settings for data file location and logging.
//! - Normalize values before any subsystem sees them.
//!
//! # Invariants
//! - A missing config file yields defaults; a malformed one is an error.
//! - After `load`, `log_level` is a supported level and `log_dir` is absolute.

use crate::logging::{default_log_level, normalize_level};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_FILE: &str = "data/resiconnect.json";
pub const DEFAULT_LOG_DIR: &str = "logs";

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "config io error: {err}"),
            Self::Json(err) => write!(f, "config is not valid JSON: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Logger parameters handed to `init_logging`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: String,
    /// Absolute directory for rotated log files.
    pub log_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// JSON data file holding the directory.
    pub data_file: PathBuf,
    pub log_level: String,
    pub log_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            log_level: default_log_level().to_string(),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
        }
    }
}

impl AppConfig {
    /// Loads and normalizes the config at `path`, or defaults when absent.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            serde_json::from_str::<AppConfig>(&contents)?
        } else {
            AppConfig::default()
        };
        config.normalized()
    }

    /// Validates the level and resolves a relative log directory against
    /// the working directory.
    pub fn normalized(mut self) -> Result<Self, ConfigError> {
        self.log_level = normalize_level(&self.log_level)
            .map_err(ConfigError::Invalid)?
            .to_string();
        if self.data_file.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("data_file cannot be empty".to_string()));
        }
        if self.log_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("log_dir cannot be empty".to_string()));
        }
        if self.log_dir.is_relative() {
            self.log_dir = std::env::current_dir()?.join(&self.log_dir);
        }
        Ok(self)
    }

    pub fn log_settings(&self) -> LogSettings {
        LogSettings {
            level: self.log_level.clone(),
            log_dir: self.log_dir.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_normalized_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(dir.path().join("absent.json")).unwrap();
        assert_eq!(config.data_file, PathBuf::from(DEFAULT_DATA_FILE));
        assert_eq!(config.log_level, default_log_level());
        assert!(config.log_dir.is_absolute());
        assert!(config.log_dir.ends_with(DEFAULT_LOG_DIR));
    }

    #[test]
    fn partial_file_keeps_defaults_for_absent_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"log_level": "WARNING", "log_dir": "/var/tmp/rc-logs"}}"#).unwrap();
        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, PathBuf::from("/var/tmp/rc-logs"));
        assert_eq!(config.data_file, PathBuf::from(DEFAULT_DATA_FILE));
    }

    #[test]
    fn unsupported_level_is_rejected() {
        let config = AppConfig {
            log_level: "verbose".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(config.normalized(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        assert!(matches!(AppConfig::load(file.path()), Err(ConfigError::Json(_))));
    }
}
