// procwatch library - public API

// Re-export error types
pub mod error;
pub use error::{ProcwatchError, Result};

// Module declarations
pub mod core;
pub mod platform;
pub mod ui;

// Re-export commonly used types
pub use crate::core::config::Config;

use std::fs::{self, OpenOptions};
use std::path::PathBuf;

// Initialize logging.
//
// The TUI owns the terminal, so records go to a log file in the cache
// directory; without one they are discarded.
pub fn init_logging() {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(log::LevelFilter::Info).parse_default_env();

    let target = match open_log_file() {
        Some(file) => env_logger::Target::Pipe(Box::new(file)),
        None => env_logger::Target::Pipe(Box::new(std::io::sink())),
    };
    builder.target(target);

    // Already initialized (e.g. in tests) is fine
    let _ = builder.try_init();
}

pub fn log_file_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("procwatch").join("procwatch.log"))
}

fn open_log_file() -> Option<fs::File> {
    let path = log_file_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}
