//! File logging.
//!
//! The TUI owns stdout, so logs go to `<config dir>/logs/cardstack.log`.
//! `CARDSTACK_LOG` takes an `EnvFilter` directive; the default is
//! `cardstack=info`. Without a writable directory, logging stays off.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directive.
pub const LOG_ENV_VAR: &str = "CARDSTACK_LOG";

pub const DEFAULT_LOG_FILTER: &str = "cardstack=info";

pub const LOG_FILE: &str = "cardstack.log";

/// Where the log file lives for a given config directory.
pub fn log_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join("logs").join(LOG_FILE)
}

/// Filter from `CARDSTACK_LOG`, falling back to the default directive.
pub fn log_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Install the global subscriber writing to a file under `config_dir`.
///
/// Returns the log path on success. Failing to create the file, or a
/// subscriber already being installed, leaves logging off.
pub fn init_logging(config_dir: Option<&Path>) -> Option<PathBuf> {
    let log_path = log_file_path(config_dir?);
    let parent = log_path.parent()?;
    fs::create_dir_all(parent).ok()?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .ok()?;

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(log_filter())
        .with(file_layer)
        .try_init()
        .ok()?;

    tracing::info!(path = ?log_path, version = env!("CARGO_PKG_VERSION"), "Logging initialized");
    Some(log_path)
}
