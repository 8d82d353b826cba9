//! API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use nestling_core::MAX_LIST_LIMIT;

/// HTTP API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// HTTP listen port
    pub http_port: u16,

    /// Interface to bind
    pub bind_host: String,

    /// SQLite database file
    pub database_path: PathBuf,

    /// Pool size
    pub db_max_connections: u32,

    /// Largest page size the catalog endpoint will return
    pub list_limit_max: u32,

    /// Default tracing filter when RUST_LOG is unset
    pub log_level: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            http_port: 8080,
            bind_host: "0.0.0.0".to_string(),
            database_path: PathBuf::from("./data/nestling.db"),
            db_max_connections: 5,
            list_limit_max: MAX_LIST_LIMIT,
            log_level: "info".to_string(),
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn load_from<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ApiConfig::default();

        let config = ApiConfig {
            http_port: parse_or(&lookup, "NESTLING_HTTP_PORT", defaults.http_port)?,

            bind_host: lookup("NESTLING_BIND_HOST").unwrap_or(defaults.bind_host),

            database_path: lookup("NESTLING_DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),

            db_max_connections: parse_or(
                &lookup,
                "NESTLING_DB_MAX_CONNECTIONS",
                defaults.db_max_connections,
            )?,

            list_limit_max: parse_or(&lookup, "NESTLING_LIST_LIMIT_MAX", defaults.list_limit_max)?,

            log_level: lookup("NESTLING_LOG").unwrap_or(defaults.log_level),
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "NESTLING_DB_MAX_CONNECTIONS".to_string(),
            ));
        }

        if config.list_limit_max == 0 || config.list_limit_max > MAX_LIST_LIMIT {
            return Err(ConfigError::InvalidValue("NESTLING_LIST_LIMIT_MAX".to_string()));
        }

        Ok(config)
    }

    /// Socket address to listen on.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.bind_host, self.http_port)
            .parse()
            .map_err(|_| ConfigError::InvalidValue("NESTLING_BIND_HOST".to_string()))
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::load_from(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.bind_host, "0.0.0.0");
        assert_eq!(config.database_path, PathBuf::from("./data/nestling.db"));
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.list_limit_max, 100);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.bind_addr().unwrap().port(), 8080);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("NESTLING_HTTP_PORT", "9090"),
            ("NESTLING_BIND_HOST", "127.0.0.1"),
            ("NESTLING_DATABASE_PATH", "/tmp/groupbuy.db"),
            ("NESTLING_LIST_LIMIT_MAX", "25"),
            ("NESTLING_LOG", "debug"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:9090");
        assert_eq!(config.database_path, PathBuf::from("/tmp/groupbuy.db"));
        assert_eq!(config.list_limit_max, 25);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            load(&[("NESTLING_HTTP_PORT", "eighty")]),
            Err(ConfigError::InvalidValue(key)) if key == "NESTLING_HTTP_PORT"
        ));
        assert!(load(&[("NESTLING_DB_MAX_CONNECTIONS", "0")]).is_err());
        assert!(load(&[("NESTLING_LIST_LIMIT_MAX", "500")]).is_err());

        let config = load(&[("NESTLING_BIND_HOST", "not a host")]).unwrap();
        assert!(config.bind_addr().is_err());
    }
}
