//! Tracing setup for the fyyur CLI
//!
//! Usage:
//!   fyyur --debug serve                 # Debug logging to console
//!   fyyur --log-file fyyur.log serve    # Also append logs to a file
//!   RUST_LOG=fyyur_server=debug fyyur   # Fine-grained log control
//!
//! Environment variables:
//!   RUST_LOG                            # Log filter (default: info)
//!   FYYUR_LOG_FILE                      # Same as --log-file

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Enable debug logging (used unless RUST_LOG is explicitly set)
    pub debug: bool,

    /// Append plain-text logs here as well as to the console
    pub log_file: Option<PathBuf>,
}

/// Initialize console tracing, plus the log file when one is configured.
pub fn init_tracing(config: &TracingConfig) -> Result<()> {
    let default_level = if config.debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let file_layer = config
        .log_file
        .as_deref()
        .map(open_log_file)
        .transpose()?
        .map(|file| {
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
        });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(config.debug).compact()) // targets in debug mode
        .with(file_layer)
        .try_init()
        .map_err(|err| anyhow!(err))
}

/// Open `path` for appending, creating it if needed.
fn open_log_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))
}
