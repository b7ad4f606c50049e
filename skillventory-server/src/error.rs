//! Error types for skillventory-server

use thiserror::Error;

use crate::config::ConfigError;

pub type Result<T> = std::result::Result<T, ServerError>;

/// Startup and serving failures
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
