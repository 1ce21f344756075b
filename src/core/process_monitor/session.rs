use std::sync::Arc;

use super::metrics::Snapshot;

/// Refresh state owned by the scheduler.
///
/// The stored snapshot is only ever replaced, so an `Arc` handed to a worker
/// stays valid and unchanged for the whole cycle.
#[derive(Debug, Default)]
pub struct RefreshSession {
    pub(crate) in_flight: bool,
    pub(crate) periodic_enabled: bool,
    pub(crate) periodic_generation: u64,
    pub(crate) snapshot: Option<Arc<Snapshot>>,
}

impl RefreshSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn is_periodic(&self) -> bool {
        self.periodic_enabled
    }

    /// Last successfully reconciled snapshot, if any
    pub fn snapshot(&self) -> Option<&Arc<Snapshot>> {
        self.snapshot.as_ref()
    }

    /// Snapshot to diff the next cycle against (empty before the first one)
    pub(crate) fn previous(&self) -> Arc<Snapshot> {
        self.snapshot
            .clone()
            .unwrap_or_else(|| Arc::new(Snapshot::empty()))
    }

    pub(crate) fn replace_snapshot(&mut self, snapshot: Snapshot) {
        self.snapshot = Some(Arc::new(snapshot));
    }
}
