//! Integration tests for the gratitude gate on a real SQLite file.

use sparkboard_core::gate::{GateController, WINDOW_MS};
use sparkboard_core::storage::keys;
use sparkboard_core::{Database, Event, KvStore};

const NOW: i64 = 1_717_000_000_000;

#[test]
fn test_answer_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sparkboard.db");

    {
        let db = Database::open_at(&path).unwrap();
        let mut gate = GateController::open(&db, 30);
        assert!(matches!(gate.arm(NOW), Event::GratitudePromptDue { .. }));
        gate.record_answer("Grandma's pancakes", NOW).unwrap();
    }

    let db = Database::open_at(&path).unwrap();
    let mut gate = GateController::open(&db, 30);
    assert_eq!(gate.current(), Some("Grandma's pancakes"));
    assert_eq!(gate.history()[0].timestamp, NOW);

    // Restart halfway through the window: the timer covers only the residual.
    let halfway = NOW + WINDOW_MS / 2;
    match gate.arm(halfway) {
        Event::ReshowScheduled { delay_ms, .. } => assert_eq!(delay_ms, (WINDOW_MS / 2) as u64),
        other => panic!("expected a scheduled re-show, got {other:?}"),
    }
    assert!(gate.tick(NOW + WINDOW_MS - 1).is_empty());
    assert_eq!(gate.tick(NOW + WINDOW_MS).len(), 1);
}

#[test]
fn test_clock_skew_waits_one_window() {
    let db = Database::open_memory().unwrap();
    db.set_raw(keys::LAST_PROMPT_AT, &(NOW + 60_000).to_string())
        .unwrap();

    let mut gate = GateController::open(&db, 30);
    assert!(!gate.should_prompt(NOW));
    match gate.arm(NOW) {
        Event::ReshowScheduled { delay_ms, .. } => assert_eq!(delay_ms, WINDOW_MS as u64),
        other => panic!("expected a scheduled re-show, got {other:?}"),
    }
}

#[test]
fn test_gate_independent_of_history_reset() {
    let db = Database::open_memory().unwrap();
    let mut gate = GateController::open(&db, 30);
    gate.record_answer("sunsets", NOW).unwrap();

    db.remove(keys::GRATITUDE_HISTORY).unwrap();
    let gate = GateController::open(&db, 30);
    assert!(gate.history().is_empty());
    assert!(!gate.should_prompt(NOW + 1));
}
