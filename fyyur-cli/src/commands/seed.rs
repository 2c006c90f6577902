//! Demo data command

use anyhow::{Context, Result};
use clap::Parser;

use fyyur_server::db::{migrations, PgCatalog};
use fyyur_server::seed;

use crate::config::DatabaseArgs;

/// Arguments for the seed command
#[derive(Parser, Debug)]
pub struct SeedArgs {
    #[command(flatten)]
    pub db: DatabaseArgs,
}

/// Insert the demo venues, artists and shows. Each run adds new rows.
pub async fn run_seed(args: SeedArgs) -> Result<()> {
    let pool = args.db.connect().await?;
    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;

    let catalog = PgCatalog::new(pool);
    let report = seed(&catalog).await.context("Failed to seed demo data")?;
    catalog.close().await;

    println!(
        "Seeded {} venues, {} artists, {} shows",
        report.venues.len(),
        report.artists.len(),
        report.shows.len()
    );
    Ok(())
}
