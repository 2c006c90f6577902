//! Schema creation command

use anyhow::{Context, Result};
use clap::Parser;

use fyyur_server::db::migrations;

use crate::config::DatabaseArgs;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub db: DatabaseArgs,
}

/// Create any missing tables and indexes, then exit.
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let pool = args.db.connect().await?;
    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;
    pool.close().await;

    tracing::info!("Schema is up to date");
    Ok(())
}
