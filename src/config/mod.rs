use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// `DATABASE_URL` value that selects the in-memory store
pub const MEMORY_STORE_URL: &str = "memory";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connection_timeout_seconds: u64,
    pub idle_timeout_seconds: u64,
}

impl DatabaseConfig {
    pub fn is_memory_store(&self) -> bool {
        self.url == MEMORY_STORE_URL
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_request_body_size: usize,
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:./data/recipes.db".to_string());

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = parse_env("PORT", "5000")?;

        let max_connections = parse_env("DATABASE_MAX_CONNECTIONS", "5")?;
        let min_connections = parse_env("DATABASE_MIN_CONNECTIONS", "1")?;
        let connection_timeout_seconds = parse_env("DATABASE_CONNECTION_TIMEOUT", "30")?;
        let idle_timeout_seconds = parse_env("DATABASE_IDLE_TIMEOUT", "600")?;

        let max_request_body_size = parse_env("MAX_REQUEST_BODY_SIZE", "1048576")?;

        Ok(Settings {
            database: DatabaseConfig {
                url: database_url,
                max_connections,
                min_connections,
                connection_timeout_seconds,
                idle_timeout_seconds,
            },
            server: ServerConfig {
                host,
                port,
                max_request_body_size,
            },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::Config("Port must be non-zero".to_string()));
        }

        if self.database.url.trim().is_empty() {
            return Err(Error::Config("DATABASE_URL must not be empty".to_string()));
        }

        if !self.database.is_memory_store() && !self.database.url.starts_with("sqlite:") {
            return Err(Error::Config(format!(
                "Unsupported DATABASE_URL '{}': expected 'sqlite:<path>' or '{MEMORY_STORE_URL}'",
                self.database.url
            )));
        }

        if self.database.max_connections == 0 {
            return Err(Error::Config(
                "DATABASE_MAX_CONNECTIONS must be non-zero".to_string(),
            ));
        }

        if self.database.min_connections > self.database.max_connections {
            return Err(Error::Config(
                "DATABASE_MIN_CONNECTIONS must not exceed DATABASE_MAX_CONNECTIONS".to_string(),
            ));
        }

        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, default: &str) -> Result<T> {
    std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|_| Error::Config(format!("Invalid {key} value")))
}
