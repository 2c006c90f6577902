//! fyyur CLI - venue and artist booking directory
//!
//! Subcommands:
//! - `serve`: run migrations, then the HTTP server
//! - `migrate`: create the schema and exit
//! - `seed`: insert the demo dataset

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

use tracing_setup::{init_tracing, TracingConfig};

#[derive(Parser, Debug)]
#[command(
    name = "fyyur",
    author,
    version,
    about = "Venue and artist booking directory",
    long_about = "List, search, create and edit venues, artists and the shows that \
                  link them. Backed by PostgreSQL."
)]
struct Cli {
    /// Enable debug logging (unless RUST_LOG is set)
    #[arg(long, global = true)]
    debug: bool,

    /// Append logs to this file as well as the console
    #[arg(long, global = true, env = "FYYUR_LOG_FILE", value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server (runs migrations first)
    Serve(commands::serve::ServeArgs),
    /// Create the database schema and exit
    Migrate(commands::migrate::MigrateArgs),
    /// Insert demo venues, artists and shows
    Seed(commands::seed::SeedArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env in the working directory, if any
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(&TracingConfig {
        debug: cli.debug,
        log_file: cli.log_file,
    })?;

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Migrate(args) => commands::run_migrate(args).await?,
        Commands::Seed(args) => commands::run_seed(args).await?,
    }
    Ok(())
}
