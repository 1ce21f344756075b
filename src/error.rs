use std::io;
use thiserror::Error;

/// Custom error type for procwatch
#[derive(Error, Debug)]
pub enum ProcwatchError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Presentation surface failed to initialize: {0}")]
    PresentationInit(String),
}

/// Result type alias for procwatch
pub type Result<T> = std::result::Result<T, ProcwatchError>;

impl ProcwatchError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        ProcwatchError::Config(msg.into())
    }

    pub fn presentation_init<S: Into<String>>(msg: S) -> Self {
        ProcwatchError::PresentationInit(msg.into())
    }
}
