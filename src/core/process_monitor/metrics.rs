use chrono::{DateTime, Local};

/// Placeholder for any text field the OS could not provide
pub const UNKNOWN: &str = "Unknown";

/// Best-effort process record as reported by a [`ProcessEnumerator`].
///
/// Only the pid is guaranteed; every other field may be missing.
///
/// [`ProcessEnumerator`]: super::ProcessEnumerator
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawProcess {
    pub pid: u32,
    pub name: Option<String>,
    pub cpu_percent: Option<f32>,
    pub memory_percent: Option<f32>,
    pub status: Option<String>,
    pub user: Option<String>,
}

impl RawProcess {
    pub fn new(pid: u32) -> Self {
        Self {
            pid,
            ..Default::default()
        }
    }
}

/// Normalized process record, as held in a [`Snapshot`].
///
/// `cpu_percent` is summed across cores and may exceed 100 on multi-core
/// machines. The name is kept untruncated.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessRecord {
    pub pid: u32,
    pub name: String,
    pub cpu_percent: f32,
    pub memory_percent: f32,
    pub status: String,
    pub user: String,
}

impl ProcessRecord {
    /// Compare everything except the pid.
    pub fn same_fields(&self, other: &ProcessRecord) -> bool {
        self.name == other.name
            && self.cpu_percent == other.cpu_percent
            && self.memory_percent == other.memory_percent
            && self.status == other.status
            && self.user == other.user
    }
}

/// One ranked, deduplicated capture of the process table
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub captured_at: DateTime<Local>,
    pub records: Vec<ProcessRecord>,
}

impl Snapshot {
    pub fn empty() -> Self {
        Self {
            captured_at: Local::now(),
            records: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, pid: u32) -> Option<&ProcessRecord> {
        self.records.iter().find(|r| r.pid == pid)
    }

    pub fn pids(&self) -> Vec<u32> {
        self.records.iter().map(|r| r.pid).collect()
    }
}
