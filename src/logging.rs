//! Diagnostics logging.
//!
//! The terminal belongs to the UI, so events go to a file through a
//! non-blocking writer. Keep the returned guard alive until exit or buffered
//! lines are lost.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive, e.g. `countdown=debug`
pub const LOG_ENV: &str = "COUNTDOWN_LOG";

const DEFAULT_FILTER: &str = "info";

fn filter_from_env() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Append to `path`, creating parent directories as needed.
///
/// Fails if the file cannot be opened. A second call in one process keeps the
/// first subscriber and still returns a guard for the new writer.
pub fn init(path: &Path) -> io::Result<WorkerGuard> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter_from_env())
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(path = %path.display(), "logging initialized");
    }
    Ok(guard)
}

/// `explicit` if given, otherwise the per-user default location
pub fn resolve_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(crate::app_dirs::AppDirs::log_path)
}
