//! File-based tracing setup. The TUI owns the terminal, so logs never go to
//! stdout or stderr.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::QuizError;

const DEFAULT_FILTER: &str = "info";

/// Send tracing output to `path`, filtered by `RUST_LOG` (default `info`).
pub fn init_file_logging(path: &Path) -> Result<(), QuizError> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| QuizError::Logging(e.to_string()))
}
