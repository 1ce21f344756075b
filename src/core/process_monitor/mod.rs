//! Process monitoring core.
//!
//! Captures the process table, ranks it, diffs it against what is on screen
//! and schedules refresh cycles off the interactive thread.

mod metrics;
pub mod reconcile;
mod scheduler;
mod session;
pub mod snapshot;
mod source;

pub use metrics::{ProcessRecord, RawProcess, Snapshot, UNKNOWN};
pub use reconcile::{reconcile, ViewOperation};
pub use scheduler::{
    CycleOutcome, RefreshScheduler, RefreshUpdate, TriggerOutcome, DEFAULT_REFRESH_INTERVAL,
};
pub use session::RefreshSession;
pub use snapshot::{build, build_at};
pub use source::{CaptureError, EnumerationError, ProcessEnumerator, ProcessReadError, ProcessSource};
