//! Schema setup without starting the server

use anyhow::{Context, Result};
use clap::Parser;

use skillventory_server::db::open_database;
use skillventory_server::Settings;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (default: sqlite://database.db)
    #[arg(long, env = "SQLITE_URL")]
    pub database_url: Option<String>,
}

/// Create the database file (if needed) and all tables
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let database_url = match args.database_url {
        Some(url) => url,
        None => {
            Settings::from_env()
                .context("Invalid configuration")?
                .database_url
        }
    };

    let pool = open_database(&database_url)
        .await
        .with_context(|| format!("Failed to migrate {}", database_url))?;
    pool.close().await;

    println!("Database ready: {}", database_url);
    Ok(())
}
