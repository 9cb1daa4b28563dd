//! Tracing setup for the server binary.
//!
//! Events always go to stdout. When `[logging] file` is set they are also
//! appended to that file, so restarts keep earlier history. `RUST_LOG`
//! overrides the configured level.

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::{AloionError, Result};

/// Map a configured level name to a filter. Unknown names fall back to info.
fn level_filter(level: &str) -> LevelFilter {
    match level.trim().to_ascii_lowercase().as_str() {
        "" => LevelFilter::INFO,
        "warning" => LevelFilter::WARN,
        other => other.parse().unwrap_or(LevelFilter::INFO),
    }
}

/// Open the log file for appending, creating parent directories.
fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

/// Build the event sink: stdout alone, or stdout teed into the log file.
fn make_writer(config: &LoggingConfig) -> Result<BoxMakeWriter> {
    match config.file.as_deref() {
        None => Ok(BoxMakeWriter::new(std::io::stdout)),
        Some(path) => {
            let file = Arc::new(open_log_file(Path::new(path))?);
            Ok(BoxMakeWriter::new(std::io::stdout.and(file)))
        }
    }
}

/// Install the global subscriber.
///
/// Fails if the log file cannot be opened or a subscriber is already set.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let writer = make_writer(config)?;
    let filter = EnvFilter::builder()
        .with_default_directive(level_filter(&config.level).into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                // ANSI escapes would end up in the file.
                .with_ansi(config.file.is_none())
                .with_target(true),
        )
        .with(filter)
        .try_init()
        .map_err(|e| AloionError::Config(format!("logging: {e}")))
}
