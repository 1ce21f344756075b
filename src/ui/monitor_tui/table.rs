use std::collections::{HashMap, HashSet};

use crate::core::process_monitor::{ProcessRecord, ViewOperation};

/// Rows currently on screen, kept in sync through [`ViewOperation`]s
#[derive(Debug, Clone, Default)]
pub struct ProcessTable {
    rows: Vec<ProcessRecord>,
}

impl ProcessTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[ProcessRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn position_of(&self, pid: u32) -> Option<usize> {
        self.rows.iter().position(|row| row.pid == pid)
    }

    /// Apply one reconciliation's worth of operations.
    ///
    /// Updated and deleted rows are resolved by pid. Every remaining row then
    /// lands on the position its `Move`/`Insert` names, or stays where it was.
    pub fn apply(&mut self, operations: &[ViewOperation]) {
        if operations.is_empty() {
            return;
        }

        let mut targets: HashMap<u32, usize> = HashMap::new();
        let mut updates: HashMap<u32, ProcessRecord> = HashMap::new();
        let mut deletes: HashSet<u32> = HashSet::new();
        let mut placed: Vec<(usize, ProcessRecord)> = Vec::new();

        for operation in operations {
            match operation {
                ViewOperation::Insert { record, position } => {
                    placed.push((*position, record.clone()));
                }
                ViewOperation::Update { pid, record } => {
                    updates.insert(*pid, record.clone());
                }
                ViewOperation::Move { pid, position } => {
                    targets.insert(*pid, *position);
                }
                ViewOperation::Delete { pid } => {
                    deletes.insert(*pid);
                }
            }
        }

        for (index, row) in std::mem::take(&mut self.rows).into_iter().enumerate() {
            if deletes.contains(&row.pid) {
                continue;
            }
            let position = targets.get(&row.pid).copied().unwrap_or(index);
            let row = updates.remove(&row.pid).unwrap_or(row);
            placed.push((position, row));
        }

        placed.sort_by_key(|(position, _)| *position);
        self.rows = placed.into_iter().map(|(_, row)| row).collect();
    }
}
