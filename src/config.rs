//! JSON-driven configuration loader for the storage-server collaborator.
//!
//! This mirrors a companion process's config file format (server bind
//! settings, a storage-engine tuning block, and logging settings) that is
//! unrelated to HTTP parsing itself but ships alongside it as the crate's
//! CLI-facing configuration surface. Booleans are encoded on the wire as
//! the integers `0`/`1`, matching the source format; [`int_bool`] bridges
//! that to a proper `bool` during deserialization.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Deserializer};

/// Top-level configuration document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub db: DbConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub datadir: String,
    pub pidfile: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DbConfig {
    pub dbname: String,
    pub lru_cache_size: i64,
    pub write_buffer_size: i64,
    pub max_open_files: i64,
    pub block_size: i64,
    pub block_restart_interval: i64,
    #[serde(deserialize_with = "int_bool")]
    pub create_if_missing: bool,
    #[serde(deserialize_with = "int_bool")]
    pub error_if_exist: bool,
    #[serde(deserialize_with = "int_bool")]
    pub paranoid_checks: bool,
    #[serde(deserialize_with = "int_bool")]
    pub compression: bool,
    #[serde(deserialize_with = "int_bool")]
    pub verify_checksums: bool,
    #[serde(deserialize_with = "int_bool")]
    pub fill_cache: bool,
    #[serde(deserialize_with = "int_bool")]
    pub sync: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LogConfig {
    pub level: String,
    pub stream: String,
}

/// Deserialize a JSON integer (`0` or `1`) as a `bool`, matching the
/// reference config format's `valueint == 1 ? true : false` convention.
fn int_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let v = i64::deserialize(deserializer)?;
    Ok(v == 1)
}

/// Errors that can occur while loading a [`Config`].
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read config file: {e}"),
            ConfigError::Parse(e) => write!(f, "failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Load and parse a [`Config`] from a JSON file. Missing fields are a hard
/// error — there are no defaults, matching the reference loader which
/// expects every key to be present.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = serde_json::from_str(&contents)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "server": {
            "host": "0.0.0.0",
            "port": 8080,
            "username": "admin",
            "password": "secret",
            "datadir": "/var/lib/store",
            "pidfile": "/var/run/store.pid"
        },
        "db": {
            "dbname": "main",
            "lru_cache_size": 67108864,
            "write_buffer_size": 4194304,
            "max_open_files": 1000,
            "block_size": 4096,
            "block_restart_interval": 16,
            "create_if_missing": 1,
            "error_if_exist": 0,
            "paranoid_checks": 0,
            "compression": 1,
            "verify_checksums": 0,
            "fill_cache": 1,
            "sync": 0
        },
        "log": {
            "level": "info",
            "stream": "stdout"
        }
    }"#;

    #[test]
    fn parses_sample_document() {
        let config: Config = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(config.server.port, 8080);
        assert!(config.db.create_if_missing);
        assert!(!config.db.error_if_exist);
        assert!(config.db.compression);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn missing_field_is_an_error() {
        let truncated = r#"{"server": {"host": "0.0.0.0"}}"#;
        let result: Result<Config, _> = serde_json::from_str(truncated);
        assert!(result.is_err());
    }
}
