//! Tracing setup: one console layer and one per-run log file
//!
//! The console layer writes to stderr and follows the `-v` count (or
//! `RUST_LOG` when set). The file layer always records stage info and every
//! warning, so a quiet run still leaves a complete trail.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::NaiveDateTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

use crate::config::DocgenConfig;

/// Create the log directory and open this run's log file in append mode
pub fn open_log_file(config: &DocgenConfig, started: NaiveDateTime) -> io::Result<(File, PathBuf)> {
    fs::create_dir_all(&config.log_dir)?;
    let path = config.log_file_path(started);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((file, path))
}

/// Install the global subscriber.
///
/// Returns the log file path, or `None` when the file could not be opened;
/// the run then logs to the screen only. Only the first call in a process
/// takes effect.
pub fn init_logging(config: &DocgenConfig, started: NaiveDateTime) -> Option<PathBuf> {
    let console_filter = EnvFilter::builder()
        .with_default_directive(config.console_level().into())
        .from_env_lossy();
    let console = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_filter(console_filter);

    let (file_layer, log_path) = match open_log_file(config, started) {
        Ok((file, path)) => {
            let layer = fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false)
                .with_filter(config.file_level());
            (Some(layer), Some(path))
        }
        Err(e) => {
            eprintln!(
                "warning: cannot open log file in {}: {} (logging to screen only)",
                config.log_dir.display(),
                e
            );
            (None, None)
        }
    };

    tracing_subscriber::registry()
        .with(console)
        .with(file_layer)
        .try_init()
        .ok();

    log_path
}
