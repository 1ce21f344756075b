//! Process Source: wraps the OS enumeration capability.
//!
//! An enumerator reports each visible process as it is read. A process that
//! vanishes or denies access mid-read is dropped here and never reaches the
//! caller; a failure of the enumeration as a whole becomes
//! [`CaptureError::PartialCapture`] carrying whatever was gathered so far.

use thiserror::Error;

use super::metrics::RawProcess;

/// Failure to read a single process (the per-process skip class).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessReadError {
    #[error("process {0} exited while being read")]
    Vanished(u32),

    #[error("access to process {0} denied")]
    AccessDenied(u32),
}

/// Failure of the enumeration mechanism itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnumerationError {
    #[error("process enumeration is not supported on this system")]
    Unsupported,

    #[error("process enumeration failed: {0}")]
    Failed(String),
}

/// Result of a capture that could not complete.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CaptureError {
    #[error("partial capture ({} processes gathered): {reason}", .gathered.len())]
    PartialCapture {
        gathered: Vec<RawProcess>,
        reason: String,
    },
}

/// OS-level capability that lists processes.
///
/// `visit` is called once per process with either the record or the reason it
/// could not be read. Returning `Err` means the enumeration stopped early.
pub trait ProcessEnumerator: Send + 'static {
    fn enumerate(
        &mut self,
        visit: &mut dyn FnMut(Result<RawProcess, ProcessReadError>),
    ) -> Result<(), EnumerationError>;
}

/// Collects raw process records from an enumerator
pub struct ProcessSource<E: ProcessEnumerator> {
    enumerator: E,
}

impl<E: ProcessEnumerator> ProcessSource<E> {
    pub fn new(enumerator: E) -> Self {
        Self { enumerator }
    }

    /// Capture every readable process.
    pub fn capture(&mut self) -> Result<Vec<RawProcess>, CaptureError> {
        let mut gathered = Vec::new();
        let mut skipped = 0usize;

        let outcome = self.enumerator.enumerate(&mut |item| match item {
            Ok(raw) => gathered.push(raw),
            Err(e) => {
                skipped += 1;
                log::trace!("Skipping process: {}", e);
            }
        });

        if skipped > 0 {
            log::debug!("Skipped {} unreadable processes", skipped);
        }

        match outcome {
            Ok(()) => Ok(gathered),
            Err(e) => {
                log::warn!(
                    "Process enumeration failed after {} records: {}",
                    gathered.len(),
                    e
                );
                Err(CaptureError::PartialCapture {
                    gathered,
                    reason: e.to_string(),
                })
            }
        }
    }
}
