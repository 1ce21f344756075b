// Integration tests for snapshot building and the process source

use procwatch::core::process_monitor::{
    build, reconcile, CaptureError, EnumerationError, ProcessEnumerator, ProcessReadError,
    ProcessSource, RawProcess, UNKNOWN,
};

struct ListEnumerator {
    items: Vec<Result<RawProcess, ProcessReadError>>,
    failure: Option<EnumerationError>,
}

impl ProcessEnumerator for ListEnumerator {
    fn enumerate(
        &mut self,
        visit: &mut dyn FnMut(Result<RawProcess, ProcessReadError>),
    ) -> Result<(), EnumerationError> {
        for item in self.items.iter().cloned() {
            visit(item);
        }
        match self.failure.clone() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

fn raw(pid: u32, cpu: Option<f32>) -> RawProcess {
    RawProcess {
        pid,
        cpu_percent: cpu,
        ..RawProcess::new(pid)
    }
}

#[test]
fn test_unchanged_capture_ranks_identically() {
    let capture = vec![
        raw(10, Some(0.0)),
        raw(4, Some(0.0)),
        raw(7, Some(12.0)),
        raw(1, None),
        raw(3, Some(12.0)),
    ];

    let first = build(capture.clone());
    let second = build(capture);

    assert_eq!(first.pids(), vec![3, 7, 1, 4, 10]);
    assert_eq!(first.records, second.records);
    assert!(reconcile(&first, &second).is_empty());
}

#[test]
fn test_source_to_snapshot_with_skips_and_defaults() {
    let mut source = ProcessSource::new(ListEnumerator {
        items: vec![
            Ok(raw(1, Some(5.0))),
            Err(ProcessReadError::Vanished(2)),
            Ok(RawProcess {
                pid: 3,
                name: None,
                cpu_percent: Some(50.0),
                memory_percent: None,
                status: None,
                user: None,
            }),
            Err(ProcessReadError::AccessDenied(4)),
        ],
        failure: None,
    });

    let snapshot = build(source.capture().unwrap());

    assert_eq!(snapshot.pids(), vec![3, 1]);
    let defaulted = snapshot.get(3).unwrap();
    assert_eq!(defaulted.name, UNKNOWN);
    assert_eq!(defaulted.user, UNKNOWN);
    assert_eq!(defaulted.status, UNKNOWN);
    assert_eq!(defaulted.memory_percent, 0.0);
}

#[test]
fn test_partial_capture_still_builds() {
    let mut source = ProcessSource::new(ListEnumerator {
        items: vec![Ok(raw(9, Some(1.0))), Ok(raw(9, Some(2.0)))],
        failure: Some(EnumerationError::Failed("interrupted".to_string())),
    });

    let gathered = match source.capture() {
        Err(CaptureError::PartialCapture { gathered, .. }) => gathered,
        Ok(_) => panic!("expected a partial capture"),
    };

    // Duplicate pid is collapsed, last record wins
    let snapshot = build(gathered);
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot.records[0].cpu_percent, 2.0);
}
