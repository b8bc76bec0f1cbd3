//! Configuration loading.
//!
//! Configuration is read once at startup from a TOML file (path in the
//! `TODO_API_CONFIG` env var, default `todo-api.toml`); a missing file means
//! defaults. `PORT` and `TODO_API_DATABASE` override the file, so the server
//! can be pointed at a port or database without editing config.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Main configuration struct
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Base path the todo routes are nested under.
    pub api_prefix: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            api_prefix: "/api/v1".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite database path; `:memory:` is accepted.
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "todos.db".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` wins when set.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment.
    pub fn load() -> Result<Config> {
        let path =
            std::env::var("TODO_API_CONFIG").unwrap_or_else(|_| "todo-api.toml".to_string());
        let mut config = if Path::new(&path).exists() {
            let raw = std::fs::read_to_string(&path)?;
            toml::from_str(&raw).map_err(|e| Error::Config(format!("{path}: {e}")))?
        } else {
            Config::default()
        };

        if let Ok(port) = std::env::var("PORT") {
            config.server.port = port
                .parse()
                .map_err(|_| Error::Config(format!("invalid PORT value: {port}")))?;
        }
        if let Ok(db_path) = std::env::var("TODO_API_DATABASE") {
            config.database.path = db_path;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject values that would otherwise only fail later, when the router
    /// is built. `Router::nest` requires a non-root path with a leading `/`.
    pub fn validate(&self) -> Result<()> {
        let prefix = &self.server.api_prefix;
        if !prefix.starts_with('/') || prefix.len() < 2 || prefix.ends_with('/') {
            return Err(Error::Config(format!(
                "invalid api_prefix {prefix:?}: must start with '/', must not end with '/', and must not be the root"
            )));
        }
        Ok(())
    }
}
