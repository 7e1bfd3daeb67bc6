//! End-to-end triage cycles against a temporary workspace root.

use std::fs;
use tempfile::TempDir;
use triage_common::{ErrorType, Severity, StateStore};
use triaged::orchestrator::run_cycle;

#[test]
fn full_cycle_fixes_and_notifies() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("app.log"),
        "[2024-01-01 10:00:00] ERROR - NullPointerException: x is null\n\
         [2024-01-01 10:00:05] ERROR - ConnectionTimeoutError: db timed out\n\
         [2024-01-01 10:00:10] ERROR : AuthenticationError: bad token\n\
         2024-01-01 10:00:12 INFO all fine\n",
    )
    .unwrap();
    fs::create_dir_all(dir.path().join("logs")).unwrap();
    fs::write(
        dir.path().join("logs/app.log"),
        "[2024-01-01 10:01:00] ERROR - FileNotFoundException: missing cfg\n",
    )
    .unwrap();

    let summary = run_cycle(dir.path()).unwrap();
    assert_eq!(summary.total_processed, 4);
    assert_eq!(summary.total_fixed, 3);
    assert_eq!(summary.total_notified, 1);

    let store = StateStore::new(dir.path());
    let state = store.load();
    assert_eq!(state.counters.total_detected, 4);
    assert_eq!(state.counters.total_resolved, 3);
    assert_eq!(state.counters.total_failed, 1);
    assert_eq!(state.resolved_history.len(), 3);
    assert_eq!(state.failed_history.len(), 1);
    assert!(state.watermark.is_some());

    let notifications = store.load_notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].error_type, ErrorType::AuthenticationError);
    assert_eq!(notifications[0].severity, Severity::Critical);
    assert!(notifications[0].requires_manual_intervention);
}

#[test]
fn second_cycle_without_new_writes_processes_nothing() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("error.log"),
        "[2024-01-01 10:00:00] ERROR - OutOfMemoryError: heap space\n",
    )
    .unwrap();

    let first = run_cycle(dir.path()).unwrap();
    assert_eq!(first.total_processed, 1);

    let second = run_cycle(dir.path()).unwrap();
    assert_eq!(second.total_processed, 0);

    let state = StateStore::new(dir.path()).load();
    assert_eq!(state.counters.total_detected, 1);
    assert_eq!(state.counters.total_resolved, 1);
}

#[test]
fn counters_never_decrease_across_cycles() {
    let dir = TempDir::new().unwrap();
    let store = StateStore::new(dir.path());

    fs::write(
        dir.path().join("app.log"),
        "[2024-01-01 10:00:00] ERROR - PermissionDenied: nope\n",
    )
    .unwrap();
    run_cycle(dir.path()).unwrap();
    let after_first = store.load().counters;

    // Append a later event and run again.
    fs::write(
        dir.path().join("app.log"),
        "[2024-01-01 10:00:00] ERROR - PermissionDenied: nope\n\
         [2099-01-01 10:00:00] ERROR - NullPointerException: later\n",
    )
    .unwrap();
    run_cycle(dir.path()).unwrap();
    let after_second = store.load().counters;

    assert!(after_second.total_detected >= after_first.total_detected);
    assert!(after_second.total_resolved >= after_first.total_resolved);
    assert!(after_second.total_failed >= after_first.total_failed);
}

#[test]
fn corrupt_state_file_never_blocks_a_cycle() {
    let dir = TempDir::new().unwrap();
    let store = StateStore::new(dir.path());
    fs::write(store.state_path(), "##garbage##").unwrap();
    fs::write(
        dir.path().join("app.log"),
        "[2024-01-01 10:00:00] ERROR - ConnectionTimeoutError: db\n",
    )
    .unwrap();

    let summary = run_cycle(dir.path()).unwrap();
    assert_eq!(summary.total_processed, 1);
    assert_eq!(summary.total_fixed, 1);

    // The corrupted history is gone; the cycle started from zero.
    let state = store.load();
    assert_eq!(state.counters.total_detected, 1);
}

#[test]
fn watermark_advances_monotonically() {
    let dir = TempDir::new().unwrap();
    let store = StateStore::new(dir.path());

    run_cycle(dir.path()).unwrap();
    let first = store.load().watermark.unwrap();
    run_cycle(dir.path()).unwrap();
    let second = store.load().watermark.unwrap();

    assert!(second >= first);
}
