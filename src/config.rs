use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{HabitualError, Result};

const DEFAULT_DB: &str = "habitual.db";
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_BIND: &str = "127.0.0.1:4000";

/// Top-level configuration, loaded from an optional YAML file.
///
/// Every section and field has a default, so a file only needs the keys it changes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file. Created on first open.
    pub path: PathBuf,
    /// How long a connection waits on a locked database before failing.
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DB),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

impl DatabaseConfig {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address the HTTP server listens on.
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, or fall back to defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let text = fs::read_to_string(path)?;
                serde_yaml::from_str::<Config>(&text)?
            }
            None => Config::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.database.path.as_os_str().is_empty() {
            return Err(HabitualError::Config(
                "database.path must not be empty".to_string(),
            ));
        }
        self.bind_addr()?;
        Ok(())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.server.bind.parse().map_err(|_| {
            HabitualError::Config(format!(
                "server.bind is not a socket address: {}",
                self.server.bind
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::load(None).unwrap();
        assert_eq!(config.database.path, PathBuf::from("habitual.db"));
        assert_eq!(config.database.busy_timeout_ms, 5_000);
        assert_eq!(config.bind_addr().unwrap().port(), 4000);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("habitual.yaml");
        fs::write(&path, "database:\n  path: /var/lib/habitual/data.db\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(
            config.database.path,
            PathBuf::from("/var/lib/habitual/data.db")
        );
        assert_eq!(config.database.busy_timeout_ms, 5_000);
        assert_eq!(config.server.bind, "127.0.0.1:4000");
    }

    #[test]
    fn test_invalid_bind_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("habitual.yaml");
        fs::write(&path, "server:\n  bind: not-an-address\n").unwrap();

        let result = Config::load(Some(&path));
        assert!(matches!(result, Err(HabitualError::Config(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let result = Config::load(Some(&tmp.path().join("nope.yaml")));
        assert!(matches!(result, Err(HabitualError::Io(_))));
    }
}
