//! Snapshot Builder: raw records in, ranked snapshot out.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, Local};

use super::metrics::{ProcessRecord, RawProcess, Snapshot, UNKNOWN};

/// Build a ranked snapshot stamped with the current time
pub fn build(records: Vec<RawProcess>) -> Snapshot {
    build_at(records, Local::now())
}

/// Build a ranked snapshot with an explicit capture time.
///
/// Duplicate pids are collapsed (the record seen last wins), every record is
/// normalized, and the result is ordered by [`rank`].
pub fn build_at(records: Vec<RawProcess>, captured_at: DateTime<Local>) -> Snapshot {
    let mut by_pid: HashMap<u32, RawProcess> = HashMap::with_capacity(records.len());
    for raw in records {
        if by_pid.insert(raw.pid, raw).is_some() {
            log::debug!("Duplicate pid in capture, keeping last record");
        }
    }

    let mut normalized: Vec<ProcessRecord> = by_pid.into_values().map(normalize).collect();
    normalized.sort_by(rank);

    Snapshot {
        captured_at,
        records: normalized,
    }
}

/// Fill in defaults for anything the OS did not report
pub fn normalize(raw: RawProcess) -> ProcessRecord {
    ProcessRecord {
        pid: raw.pid,
        name: text_or_unknown(raw.name),
        cpu_percent: percent_or_zero(raw.cpu_percent),
        memory_percent: percent_or_zero(raw.memory_percent),
        status: text_or_unknown(raw.status),
        user: text_or_unknown(raw.user),
    }
}

/// Ranking policy: CPU descending, then pid ascending.
pub fn rank(a: &ProcessRecord, b: &ProcessRecord) -> Ordering {
    b.cpu_percent
        .total_cmp(&a.cpu_percent)
        .then_with(|| a.pid.cmp(&b.pid))
}

fn text_or_unknown(value: Option<String>) -> String {
    match value {
        Some(s) if !s.trim().is_empty() => s,
        _ => UNKNOWN.to_string(),
    }
}

fn percent_or_zero(value: Option<f32>) -> f32 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}
