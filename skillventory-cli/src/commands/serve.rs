//! HTTP server command
//!
//! Settings come from the environment (and `.env`); flags given here win.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use skillventory_server::Settings;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: SKILLVENTORY_BIND or 127.0.0.1:8000)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (default: sqlite://database.db)
    #[arg(long, env = "SQLITE_URL")]
    pub database_url: Option<String>,
}

impl ServeArgs {
    fn settings(self) -> Result<Settings> {
        let mut settings = Settings::from_env().context("Invalid server configuration")?;

        if let Some(url) = self.database_url {
            settings.database_url = url;
        }
        if let Some(bind) = self.bind {
            settings.server.bind_addr = bind;
        }
        if self.cors_permissive {
            settings.server.cors_permissive = true;
        }

        Ok(settings)
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let settings = args.settings()?;
    tracing::info!("Starting skillventory server on {}", settings.server.bind_addr);

    // Blocks until shutdown
    skillventory_server::serve(settings)
        .await
        .context("Server error")?;

    Ok(())
}
