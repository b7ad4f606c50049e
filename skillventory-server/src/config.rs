//! Runtime settings
//!
//! Loaded from environment variables:
//! - `SQLITE_URL`: database connection string (default: sqlite://database.db)
//! - `SKILLVENTORY_BIND`: listen address (default: 127.0.0.1:8000)
//! - `SKILLVENTORY_CORS_PERMISSIVE`: `true`/`1` allows any origin

use std::net::SocketAddr;

use crate::http::ServerConfig;

/// Default on-disk database, relative to the working directory
pub const DEFAULT_DATABASE_URL: &str = "sqlite://database.db";

/// In-memory database used by tests
pub const TEST_DATABASE_URL: &str = "sqlite::memory:";

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var} '{value}': {source}")]
    InvalidAddr {
        var: &'static str,
        value: String,
        source: std::net::AddrParseError,
    },
}

/// Process settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub server: ServerConfig,
}

impl Settings {
    /// Create settings from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// In-memory settings (for testing)
    pub fn for_testing() -> Self {
        Self {
            database_url: TEST_DATABASE_URL.to_string(),
            server: ServerConfig::default(),
        }
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("SQLITE_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let mut server = ServerConfig::default();
        if let Some(bind) = lookup("SKILLVENTORY_BIND") {
            server.bind_addr = bind
                .parse::<SocketAddr>()
                .map_err(|source| ConfigError::InvalidAddr {
                    var: "SKILLVENTORY_BIND",
                    value: bind.clone(),
                    source,
                })?;
        }
        server.cors_permissive = lookup("SKILLVENTORY_CORS_PERMISSIVE")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            database_url,
            server,
        })
    }
}
