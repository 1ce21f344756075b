//! Refresh Scheduler.
//!
//! Runs capture, build and reconcile on a tokio blocking worker and hands the
//! result back over a channel. The owner drains that channel with
//! [`RefreshScheduler::poll`] from its own loop, so nothing here ever touches
//! presentation state from another thread.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::{Handle, Runtime};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use super::metrics::Snapshot;
use super::reconcile::{reconcile, ViewOperation};
use super::session::RefreshSession;
use super::snapshot;
use super::source::{CaptureError, ProcessEnumerator, ProcessSource};
use crate::error::Result;

/// Default cadence of periodic refresh
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(5);

const MIN_REFRESH_INTERVAL: Duration = Duration::from_millis(10);

/// What happened to a refresh request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// A new cycle was started
    Started,
    /// A cycle is already running; the request was dropped
    Dropped,
}

/// How a refresh cycle ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    Complete,
    /// Enumeration degraded; the snapshot holds whatever was gathered
    Partial { reason: String },
    /// The worker died; no operations, previous snapshot kept
    Failed { reason: String },
}

/// Result of one cycle, as delivered to the presentation surface
#[derive(Debug, Clone)]
pub struct RefreshUpdate {
    pub operations: Vec<ViewOperation>,
    pub process_count: usize,
    pub outcome: CycleOutcome,
    pub status: String,
}

enum RefreshMessage {
    Tick { generation: u64 },
    Completed(CycleResult),
}

enum CycleResult {
    /// A snapshot was built, possibly from a partial capture
    Built {
        snapshot: Snapshot,
        operations: Vec<ViewOperation>,
        partial: Option<String>,
    },
    Failed { reason: String },
}

impl CycleResult {
    fn failed(reason: String) -> Self {
        CycleResult::Failed { reason }
    }
}

/// Owns the refresh session and the worker runtime
pub struct RefreshScheduler<E: ProcessEnumerator> {
    session: RefreshSession,
    source: Arc<Mutex<ProcessSource<E>>>,
    runtime: Option<Runtime>,
    handle: Handle,
    tx: mpsc::UnboundedSender<RefreshMessage>,
    rx: mpsc::UnboundedReceiver<RefreshMessage>,
    periodic_task: Option<JoinHandle<()>>,
    interval: Duration,
}

impl<E: ProcessEnumerator> RefreshScheduler<E> {
    /// Create a scheduler with its own worker runtime.
    pub fn new(enumerator: E) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_time()
            .thread_name("refresh-worker")
            .build()?;
        let handle = runtime.handle().clone();
        let (tx, rx) = mpsc::unbounded_channel();

        log::info!("Refresh scheduler initialized");

        Ok(Self {
            session: RefreshSession::new(),
            source: Arc::new(Mutex::new(ProcessSource::new(enumerator))),
            runtime: Some(runtime),
            handle,
            tx,
            rx,
            periodic_task: None,
            interval: DEFAULT_REFRESH_INTERVAL,
        })
    }

    pub fn session(&self) -> &RefreshSession {
        &self.session
    }

    pub fn is_in_flight(&self) -> bool {
        self.session.in_flight
    }

    pub fn is_periodic(&self) -> bool {
        self.session.periodic_enabled
    }

    /// Interval of the most recent `set_periodic` call
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Request one refresh cycle. Dropped while another cycle is running.
    pub fn trigger_refresh(&mut self) -> TriggerOutcome {
        if self.session.in_flight {
            log::debug!("Refresh already in flight, dropping request");
            return TriggerOutcome::Dropped;
        }
        self.session.in_flight = true;

        let previous = self.session.previous();
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();

        self.handle.spawn(async move {
            let result = tokio::task::spawn_blocking(move || run_cycle(&source, &previous))
                .await
                .unwrap_or_else(|e| {
                    log::error!("Refresh worker failed: {}", e);
                    CycleResult::failed(format!("refresh worker stopped: {}", e))
                });

            // Only fails once the scheduler has been dropped
            let _ = tx.send(RefreshMessage::Completed(result));
        });

        TriggerOutcome::Started
    }

    /// Turn periodic refresh on or off.
    ///
    /// Ticks queued by an earlier timer are ignored from this call on. A cycle
    /// already running is left alone.
    pub fn set_periodic(&mut self, enabled: bool, interval: Duration) {
        if let Some(task) = self.periodic_task.take() {
            task.abort();
        }

        self.session.periodic_generation += 1;
        self.session.periodic_enabled = enabled;
        self.interval = interval;

        if enabled {
            let period = interval.max(MIN_REFRESH_INTERVAL);
            let generation = self.session.periodic_generation;
            let tx = self.tx.clone();
            self.periodic_task = Some(self.handle.spawn(periodic_ticker(tx, period, generation)));
            log::info!("Periodic refresh enabled every {:?}", period);
        } else {
            log::info!("Periodic refresh disabled");
        }
    }

    /// Drain finished cycles and pending ticks without blocking.
    ///
    /// Returns one update per completed cycle, in completion order.
    pub fn poll(&mut self) -> Vec<RefreshUpdate> {
        let mut updates = Vec::new();

        while let Ok(message) = self.rx.try_recv() {
            match message {
                RefreshMessage::Tick { generation } => {
                    if self.session.periodic_enabled
                        && generation == self.session.periodic_generation
                    {
                        self.trigger_refresh();
                    } else {
                        log::trace!("Ignoring stale periodic tick");
                    }
                }
                RefreshMessage::Completed(result) => {
                    updates.push(self.complete_cycle(result));
                }
            }
        }

        updates
    }

    /// Stop scheduling; a running cycle is abandoned, not awaited.
    pub fn shutdown(self) {
        // Drop does the work
    }

    fn complete_cycle(&mut self, result: CycleResult) -> RefreshUpdate {
        self.session.in_flight = false;

        let (operations, outcome, status) = match result {
            CycleResult::Failed { reason } => (
                Vec::new(),
                CycleOutcome::Failed {
                    reason: reason.clone(),
                },
                format!("Error loading processes: {}", reason),
            ),
            CycleResult::Built {
                snapshot,
                operations,
                partial,
            } => {
                let updated = snapshot.captured_at.format("%H:%M:%S");
                let (outcome, status) = match partial {
                    Some(reason) => (
                        CycleOutcome::Partial {
                            reason: reason.clone(),
                        },
                        format!(
                            "Loaded {} processes (partial: {}) - Last updated: {}",
                            snapshot.len(),
                            reason,
                            updated
                        ),
                    ),
                    None => (
                        CycleOutcome::Complete,
                        format!(
                            "Loaded {} processes - Last updated: {}",
                            snapshot.len(),
                            updated
                        ),
                    ),
                };
                self.session.replace_snapshot(snapshot);
                (operations, outcome, status)
            }
        };

        let process_count = self.session.snapshot().map(|s| s.len()).unwrap_or(0);

        log::debug!(
            "Refresh cycle finished: {} operations, {} processes",
            operations.len(),
            process_count
        );

        RefreshUpdate {
            operations,
            process_count,
            outcome,
            status,
        }
    }
}

impl<E: ProcessEnumerator> Drop for RefreshScheduler<E> {
    fn drop(&mut self) {
        if let Some(task) = self.periodic_task.take() {
            task.abort();
        }
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

/// Capture, build and reconcile. Runs on a blocking worker thread.
fn run_cycle<E: ProcessEnumerator>(
    source: &Mutex<ProcessSource<E>>,
    previous: &Snapshot,
) -> CycleResult {
    let captured = source.lock().capture();

    let (records, partial) = match captured {
        Ok(records) => (records, None),
        Err(CaptureError::PartialCapture { gathered, reason }) => (gathered, Some(reason)),
    };

    let next = snapshot::build(records);
    let operations = reconcile(previous, &next);

    CycleResult::Built {
        snapshot: next,
        operations,
        partial,
    }
}

/// Sends a tick every `period` until aborted or the receiver is gone.
async fn periodic_ticker(
    tx: mpsc::UnboundedSender<RefreshMessage>,
    period: Duration,
    generation: u64,
) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        if tx.send(RefreshMessage::Tick { generation }).is_err() {
            break;
        }
    }
}
