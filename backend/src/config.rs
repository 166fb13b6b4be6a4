//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use std::env;
use std::str::FromStr;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Product store configuration
    pub store: StoreConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

/// Which product store implementation to run against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// SQLite database file
    Sqlite,
    /// Process memory; data is lost on restart
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(StoreBackend::Sqlite),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(anyhow::anyhow!("Unknown store backend: {}", other)),
        }
    }
}

/// Product store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Store implementation
    pub backend: StoreBackend,
    /// SQLite database URL or path
    pub database_url: String,
    /// Maximum pooled database connections
    pub max_connections: u32,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = match lookup("STORE_BACKEND") {
            Some(value) => value.parse()?,
            None => StoreBackend::Sqlite,
        };

        Ok(Self {
            server: ServerConfig {
                port: lookup("PORT")
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
                host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            },
            store: StoreConfig {
                backend,
                database_url: lookup("DATABASE_URL")
                    .unwrap_or_else(|| "sqlite:data/products.db".to_string()),
                max_connections: lookup("DB_MAX_CONNECTIONS")
                    .and_then(|n| n.parse().ok())
                    .filter(|n| *n > 0)
                    .unwrap_or(5),
            },
        })
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
