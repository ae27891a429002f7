use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Environment variable controlling the log filter, e.g.
/// `HOMELEDGER_LOG=debug`.
pub const LOG_FILTER_VAR: &str = "HOMELEDGER_LOG";

/// Route tracing output to a log file in the data directory. The terminal
/// belongs to the UI, so nothing is ever written to stderr.
pub fn init(data_dir: &Path) -> Result<()> {
    let log_path = data_dir.join("homeledger.log");
    let file = File::create(&log_path)
        .with_context(|| format!("Failed to create log file: {}", log_path.display()))?;

    let filter = EnvFilter::try_from_env(LOG_FILTER_VAR).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set up logging: {e}"))
}
