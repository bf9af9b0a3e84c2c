use std::{
    fs::{self, OpenOptions},
    path::Path,
    sync::Mutex,
};

use tracing_subscriber::EnvFilter;

use crate::{
    config::AppConfig,
    error::{AppError, Result},
};

/// Installs the global subscriber, writing to `log_file`.
///
/// The terminal is in raw mode while the app runs, so nothing is written to
/// stdout/stderr. An empty `log_file` leaves tracing without a subscriber.
pub fn init(config: &AppConfig) -> Result<()> {
    let log_file = config.log_file.trim();
    if log_file.is_empty() {
        return Ok(());
    }

    let path = Path::new(log_file);
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_new(filter_directives(&config.log_level))
        .map_err(|err| AppError::Invalid(format!("log_level: {err}")))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| AppError::Invalid(format!("logger: {err}")))?;

    tracing::info!(path = %path.display(), "logging initialized");
    Ok(())
}

/// A bare level applies to our crates only; anything with `=` or `,` is
/// passed through as full directives.
fn filter_directives(level: &str) -> String {
    let level = level.trim();
    if level.contains('=') || level.contains(',') {
        return level.to_string();
    }
    format!("txview_tui={level},engine={level}")
}
