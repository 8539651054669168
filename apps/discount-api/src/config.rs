//! # Server Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     DISCOUNT_PORT=9090                                                 │
//! │     DISCOUNT_STORE=sqlite                                              │
//! │                                                                         │
//! │  2. TOML Config File (path from DISCOUNT_CONFIG)                       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     0.0.0.0:8080, in-memory store                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [store]
//! backend = "sqlite"          # memory | sqlite
//! database_path = "./data/discounts.db"
//! max_connections = 5
//! fallback_to_memory = true   # serve from memory if SQLite won't open
//!
//! [logging]
//! filter = "discount_api=info,discount_db=info"
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Key |
//! |----------|-----|
//! | `DISCOUNT_CONFIG` | path of the TOML file |
//! | `DISCOUNT_HOST` | `server.host` |
//! | `DISCOUNT_PORT` | `server.port` |
//! | `DISCOUNT_STORE` | `store.backend` |
//! | `DISCOUNT_DATABASE_PATH` | `store.database_path` |
//! | `DISCOUNT_DB_MAX_CONNECTIONS` | `store.max_connections` |
//! | `DISCOUNT_STORE_FALLBACK` | `store.fallback_to_memory` |
//!
//! `RUST_LOG`, when set, takes precedence over `logging.filter`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Environment variable naming the TOML config file.
pub const CONFIG_PATH_ENV: &str = "DISCOUNT_CONFIG";

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

// =============================================================================
// Settings
// =============================================================================

/// Full server configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub server: ServerSettings,
    pub store: StoreSettings,
    pub logging: LoggingSettings,
}

/// Listener settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Which catalog store backs the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// Process-local, lost on restart.
    #[default]
    Memory,
    /// SQLite file at `store.database_path`.
    Sqlite,
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::Memory => write!(f, "memory"),
            StoreBackend::Sqlite => write!(f, "sqlite"),
        }
    }
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "in_memory" | "inmemory" => Ok(StoreBackend::Memory),
            "sqlite" => Ok(StoreBackend::Sqlite),
            other => Err(ConfigError::Invalid(format!("unknown store backend '{other}'"))),
        }
    }
}

/// Catalog store settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    pub backend: StoreBackend,
    pub database_path: PathBuf,
    pub max_connections: u32,
    /// Serve from memory (with a warning) when SQLite cannot be opened.
    pub fallback_to_memory: bool,
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            backend: StoreBackend::Memory,
            database_path: PathBuf::from("./data/discounts.db"),
            max_connections: 5,
            fallback_to_memory: true,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing_subscriber::EnvFilter` directive.
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: "discount_api=info,discount_db=info".to_string(),
        }
    }
}

// =============================================================================
// Loading
// =============================================================================

impl ApiConfig {
    /// Loads configuration: defaults, then the TOML file, then environment.
    ///
    /// ## Arguments
    /// * `config_path` - Explicit file; falls back to `DISCOUNT_CONFIG`.
    ///   A missing file is an error only when a path was given.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let path = config_path.or_else(|| std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from));

        let mut config = match path {
            Some(path) => Self::from_file(&path)?,
            None => {
                debug!("No config file given, using defaults");
                Self::default()
            }
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML config file. Absent keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        info!(path = %path.display(), "Loading config file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Applies overrides from a variable lookup (the process environment
    /// in production, a map in tests). Unparseable values are ignored with
    /// a warning.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("DISCOUNT_HOST") {
            self.server.host = host;
        }

        if let Some(port) = lookup("DISCOUNT_PORT") {
            match port.parse::<u16>() {
                Ok(p) => {
                    debug!(port = p, "Overriding port from environment");
                    self.server.port = p;
                }
                Err(_) => warn!(value = %port, "Ignoring invalid DISCOUNT_PORT"),
            }
        }

        if let Some(backend) = lookup("DISCOUNT_STORE") {
            match backend.parse::<StoreBackend>() {
                Ok(b) => {
                    debug!(backend = %b, "Overriding store backend from environment");
                    self.store.backend = b;
                }
                Err(e) => warn!(error = %e, "Ignoring invalid DISCOUNT_STORE"),
            }
        }

        if let Some(path) = lookup("DISCOUNT_DATABASE_PATH") {
            self.store.database_path = PathBuf::from(path);
        }

        if let Some(max) = lookup("DISCOUNT_DB_MAX_CONNECTIONS") {
            match max.parse::<u32>() {
                Ok(m) => self.store.max_connections = m,
                Err(_) => warn!(value = %max, "Ignoring invalid DISCOUNT_DB_MAX_CONNECTIONS"),
            }
        }

        if let Some(flag) = lookup("DISCOUNT_STORE_FALLBACK") {
            match parse_bool(&flag) {
                Some(b) => self.store.fallback_to_memory = b,
                None => warn!(value = %flag, "Ignoring invalid DISCOUNT_STORE_FALLBACK"),
            }
        }
    }

    /// Rejects settings the server cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "store.max_connections must be at least 1".to_string(),
            ));
        }

        if self.store.backend == StoreBackend::Sqlite
            && self.store.database_path.as_os_str().is_empty()
        {
            return Err(ConfigError::Invalid(
                "store.database_path is required for the sqlite backend".to_string(),
            ));
        }

        Ok(())
    }

    /// `host:port` to bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert!(config.store.fallback_to_memory);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ApiConfig = toml::from_str(
            r#"
            [store]
            backend = "sqlite"
            database_path = "/var/lib/discounts.db"
            "#,
        )
        .unwrap();

        assert_eq!(config.store.backend, StoreBackend::Sqlite);
        assert_eq!(config.store.database_path, PathBuf::from("/var/lib/discounts.db"));
        assert_eq!(config.store.max_connections, 5);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ApiConfig::default();
        config.apply_overrides(env(&[
            ("DISCOUNT_HOST", "127.0.0.1"),
            ("DISCOUNT_PORT", "9090"),
            ("DISCOUNT_STORE", "SQLite"),
            ("DISCOUNT_DATABASE_PATH", "/tmp/d.db"),
            ("DISCOUNT_DB_MAX_CONNECTIONS", "8"),
            ("DISCOUNT_STORE_FALLBACK", "false"),
        ]));

        assert_eq!(config.bind_addr(), "127.0.0.1:9090");
        assert_eq!(config.store.backend, StoreBackend::Sqlite);
        assert_eq!(config.store.database_path, PathBuf::from("/tmp/d.db"));
        assert_eq!(config.store.max_connections, 8);
        assert!(!config.store.fallback_to_memory);
    }

    #[test]
    fn test_invalid_env_values_are_ignored() {
        let mut config = ApiConfig::default();
        config.apply_overrides(env(&[
            ("DISCOUNT_PORT", "eighty"),
            ("DISCOUNT_STORE", "postgres"),
            ("DISCOUNT_STORE_FALLBACK", "maybe"),
        ]));
        assert_eq!(config, ApiConfig::default());
    }

    #[test]
    fn test_validate_rejects_zero_connections() {
        let mut config = ApiConfig::default();
        config.store.max_connections = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = ApiConfig::from_file(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
