// Integration tests for the reconciler
// Replays operations against the table model and checks the result matches

use chrono::Local;
use procwatch::core::process_monitor::{
    build_at, reconcile, ProcessRecord, RawProcess, Snapshot, ViewOperation,
};
use procwatch::ui::ProcessTable;
use proptest::prelude::*;

fn raw(pid: u32, cpu: f32) -> RawProcess {
    RawProcess {
        pid,
        name: Some(format!("proc{}", pid)),
        cpu_percent: Some(cpu),
        memory_percent: Some(1.5),
        status: Some("running".to_string()),
        user: Some("root".to_string()),
    }
}

fn snapshot(records: Vec<RawProcess>) -> Snapshot {
    build_at(records, Local::now())
}

/// Ordered snapshot exactly as given, bypassing ranking
fn ordered(pids: &[u32]) -> Snapshot {
    Snapshot {
        captured_at: Local::now(),
        records: pids
            .iter()
            .map(|&pid| ProcessRecord {
                pid,
                name: format!("proc{}", pid),
                cpu_percent: 0.0,
                memory_percent: 0.0,
                status: "running".to_string(),
                user: "root".to_string(),
            })
            .collect(),
    }
}

fn table_holding(snapshot: &Snapshot) -> ProcessTable {
    let mut table = ProcessTable::new();
    table.apply(&reconcile(&Snapshot::empty(), snapshot));
    table
}

fn assert_replay(previous: &Snapshot, next: &Snapshot) {
    let mut table = table_holding(previous);
    assert_eq!(table.rows(), previous.records.as_slice());

    table.apply(&reconcile(previous, next));
    assert_eq!(
        table.rows(),
        next.records.as_slice(),
        "replay of {:?} -> {:?} diverged",
        previous.pids(),
        next.pids()
    );
}

fn raw_process_strategy() -> impl Strategy<Value = RawProcess> {
    (1_u32..21, 0_u32..5, any::<bool>()).prop_map(|(pid, load, sleeping)| {
        let mut record = raw(pid, load as f32 * 10.0);
        if sleeping {
            record.status = Some("sleeping".to_string());
        }
        record
    })
}

fn capture_strategy() -> impl Strategy<Value = Vec<RawProcess>> {
    prop::collection::vec(raw_process_strategy(), 0..12)
}

#[test]
fn test_reconcile_identical_snapshots_is_empty() {
    let s = snapshot(vec![raw(1, 3.0), raw(2, 9.0), raw(3, 9.0)]);
    assert!(reconcile(&s, &s).is_empty());
}

#[test]
fn test_reconcile_from_empty_is_all_inserts_in_order() {
    let next = snapshot(vec![raw(8, 1.0), raw(3, 7.0), raw(5, 4.0)]);
    let ops = reconcile(&Snapshot::empty(), &next);

    assert_eq!(ops.len(), next.len());
    for (i, op) in ops.iter().enumerate() {
        match op {
            ViewOperation::Insert { record, position } => {
                assert_eq!(*position, i);
                assert_eq!(record, &next.records[i]);
            }
            other => panic!("unexpected operation {:?}", other),
        }
    }
}

#[test]
fn test_reconcile_to_empty_is_all_deletes() {
    let previous = snapshot(vec![raw(8, 1.0), raw(3, 7.0), raw(5, 4.0)]);
    let ops = reconcile(&previous, &Snapshot::empty());

    assert_eq!(ops.len(), previous.len());
    assert!(ops
        .iter()
        .all(|op| matches!(op, ViewOperation::Delete { .. })));
}

#[test]
fn test_reconcile_both_empty() {
    assert!(reconcile(&Snapshot::empty(), &Snapshot::empty()).is_empty());
}

#[test]
fn test_swap_scenario() {
    let previous = snapshot(vec![raw(1, 50.0), raw(2, 30.0)]);
    let next = snapshot(vec![raw(2, 60.0), raw(1, 50.0), raw(3, 10.0)]);

    let ops = reconcile(&previous, &next);

    assert_eq!(ops.len(), 4);
    match &ops[0] {
        ViewOperation::Update { pid: 2, record } => assert_eq!(record.cpu_percent, 60.0),
        other => panic!("expected update of pid 2, got {:?}", other),
    }
    assert_eq!(ops[1], ViewOperation::Move { pid: 2, position: 0 });
    assert_eq!(ops[2], ViewOperation::Move { pid: 1, position: 1 });
    match &ops[3] {
        ViewOperation::Insert { record, position } => {
            assert_eq!(record.pid, 3);
            assert_eq!(*position, 2);
        }
        other => panic!("expected insert of pid 3, got {:?}", other),
    }

    assert_replay(&previous, &next);
}

#[test]
fn test_replay_with_interleaved_insert_and_delete() {
    // An insert lands between two rows that keep their original index
    assert_replay(&ordered(&[1, 2, 3, 4]), &ordered(&[3, 2, 9, 4]));
    assert_replay(&ordered(&[1, 2, 3]), &ordered(&[9, 1, 3]));
    assert_replay(&ordered(&[1, 2]), &ordered(&[9, 2, 1]));
    assert_replay(&ordered(&[1, 2, 3]), &ordered(&[3, 2, 1]));
}

proptest! {
    #[test]
    fn test_replay_matches_next_for_generated_pairs(
        previous in capture_strategy(),
        next in capture_strategy()
    ) {
        assert_replay(&snapshot(previous), &snapshot(next));
    }

    #[test]
    fn test_reconcile_with_itself_is_empty(capture in capture_strategy()) {
        let s = snapshot(capture);
        prop_assert!(reconcile(&s, &s).is_empty());
    }

    #[test]
    fn test_rebuilding_same_capture_keeps_order(capture in capture_strategy()) {
        let first = snapshot(capture.clone());
        let second = snapshot(capture);
        prop_assert_eq!(first.pids(), second.pids());
        prop_assert_eq!(first.records, second.records);
    }
}

#[test]
fn test_unchanged_rows_produce_no_operations() {
    let previous = snapshot(vec![raw(1, 40.0), raw(2, 20.0), raw(3, 10.0)]);
    // Only pid 3 changes, and it stays last
    let next = snapshot(vec![raw(1, 40.0), raw(2, 20.0), raw(3, 15.0)]);

    let ops = reconcile(&previous, &next);
    assert_eq!(ops.len(), 1);
    assert_eq!(ops[0].pid(), 3);
}

#[test]
fn test_defaulted_fields_do_not_change_identity() {
    let previous = snapshot(vec![RawProcess::new(77)]);
    let mut named = RawProcess::new(77);
    named.name = Some("late-name".to_string());
    let next = snapshot(vec![named]);

    let ops = reconcile(&previous, &next);
    assert_eq!(ops.len(), 1);
    assert!(matches!(ops[0], ViewOperation::Update { pid: 77, .. }));
}
