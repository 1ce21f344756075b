//! Keyed diff between two ranked snapshots.
//!
//! Positions in [`ViewOperation::Insert`] and [`ViewOperation::Move`] are
//! indices into the ordering of the *new* snapshot. A row that receives no
//! `Move` already sits at its final index, so a view can apply the list as:
//! replace fields on `Update`, drop rows on `Delete`, then place every row at
//! its target index.

use std::collections::{HashMap, HashSet};

use super::metrics::{ProcessRecord, Snapshot};

/// A single change to apply to a displayed process table
#[derive(Debug, Clone, PartialEq)]
pub enum ViewOperation {
    Insert { record: ProcessRecord, position: usize },
    Update { pid: u32, record: ProcessRecord },
    Move { pid: u32, position: usize },
    Delete { pid: u32 },
}

impl ViewOperation {
    pub fn pid(&self) -> u32 {
        match self {
            ViewOperation::Insert { record, .. } => record.pid,
            ViewOperation::Update { pid, .. }
            | ViewOperation::Move { pid, .. }
            | ViewOperation::Delete { pid } => *pid,
        }
    }
}

/// Compute the operations that turn `previous` into `next`.
///
/// Inserts, updates and moves come first in `next` order (an update precedes
/// the move for the same pid); deletes follow in `previous` order. Rows whose
/// fields and position are both unchanged produce nothing.
pub fn reconcile(previous: &Snapshot, next: &Snapshot) -> Vec<ViewOperation> {
    let previous_index: HashMap<u32, (usize, &ProcessRecord)> = previous
        .records
        .iter()
        .enumerate()
        .map(|(position, record)| (record.pid, (position, record)))
        .collect();

    let mut operations = Vec::new();
    let mut seen: HashSet<u32> = HashSet::with_capacity(next.len());

    for (position, record) in next.records.iter().enumerate() {
        seen.insert(record.pid);

        match previous_index.get(&record.pid) {
            None => operations.push(ViewOperation::Insert {
                record: record.clone(),
                position,
            }),
            Some(&(old_position, old_record)) => {
                if !old_record.same_fields(record) {
                    operations.push(ViewOperation::Update {
                        pid: record.pid,
                        record: record.clone(),
                    });
                }
                if old_position != position {
                    operations.push(ViewOperation::Move {
                        pid: record.pid,
                        position,
                    });
                }
            }
        }
    }

    operations.extend(
        previous
            .records
            .iter()
            .filter(|record| !seen.contains(&record.pid))
            .map(|record| ViewOperation::Delete { pid: record.pid }),
    );

    operations
}
