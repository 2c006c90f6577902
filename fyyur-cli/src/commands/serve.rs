//! HTTP server command
//!
//! Runs migrations, then serves until Ctrl+C/SIGTERM.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use fyyur_server::db::{migrations, Catalog, MemoryCatalog, PgCatalog};
use fyyur_server::http::{run_server, ServerConfig};
use fyyur_server::seed;

use crate::config::DatabaseArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "FYYUR_BIND", default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    /// Per-request timeout in seconds
    #[arg(long, env = "FYYUR_TIMEOUT", default_value_t = 30)]
    pub timeout: u64,

    /// Serve from a seeded in-memory catalog instead of PostgreSQL
    #[arg(long)]
    pub in_memory: bool,

    #[command(flatten)]
    pub db: DatabaseArgs,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let catalog: Arc<dyn Catalog> = if args.in_memory {
        let catalog = MemoryCatalog::new();
        seed(&catalog).await.context("Failed to seed in-memory catalog")?;
        tracing::warn!("Serving from memory; nothing will be persisted");
        Arc::new(catalog)
    } else {
        let pool = args.db.connect().await?;
        migrations::run(&pool)
            .await
            .context("Failed to run migrations")?;
        Arc::new(PgCatalog::new(pool))
    };

    tracing::info!("Starting fyyur server on {}", args.bind);

    let config = ServerConfig {
        bind_addr: args.bind,
        request_timeout: Duration::from_secs(args.timeout),
    };

    // Run server (blocks until shutdown)
    run_server(catalog, config).await.context("Server error")?;

    Ok(())
}
