//! skillventory-server: skill inventory over HTTP
//!
//! Tracks named skills and a self-assessed confidence level for each,
//! stored in SQLite and exposed as a small REST API.

pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod models;

pub use config::Settings;
pub use error::{Result, ServerError};
pub use http::{build_router, run_server, AppState, ServerConfig};

/// Open the configured database, run migrations and serve until shutdown.
pub async fn serve(settings: Settings) -> Result<()> {
    tracing::info!(database_url = %settings.database_url, "Opening database");
    let pool = db::open_database(&settings.database_url).await?;

    run_server(pool, settings.server).await
}
