//! Single steps forward and backward, in filtered and full display mode.

use metatrace_debug::stepping::single_step;
use metatrace_debug::{Cursor, Landing, StepMode};
use metatrace_foundation::EventKind;
use metatrace_trace::{TraceStore, synthetic};

fn walk(store: &mut TraceStore, mode: StepMode) -> Vec<usize> {
    let mut cursor = Cursor::BeforeStart;
    let mut visited = Vec::new();
    loop {
        let (next, landing) = single_step(store, cursor, mode, 1).unwrap();
        cursor = next;
        match landing {
            Landing::Frame(position) => visited.push(position),
            Landing::Terminal => return visited,
            other => panic!("unexpected landing {other:?}"),
        }
    }
}

// =============================================================================
// Display Modes
// =============================================================================

#[test]
fn full_mode_walks_every_recorded_event() {
    let mut store = TraceStore::new(synthetic::specialized());
    assert_eq!(walk(&mut store, StepMode::Full), vec![0, 1, 2, 3]);
}

#[test]
fn filtered_and_full_walks_agree_when_nothing_is_hidden() {
    let mut filtered = TraceStore::new(synthetic::fibonacci(4));
    let mut full = TraceStore::new(synthetic::fibonacci(4));
    assert_eq!(
        walk(&mut filtered, StepMode::Filtered),
        walk(&mut full, StepMode::Full)
    );
}

// =============================================================================
// Mixed Movement
// =============================================================================

#[test]
fn interleaved_forward_and_backward_steps_compose() {
    let mut store = TraceStore::new(synthetic::fibonacci(5));
    let (cursor, _) = single_step(&mut store, Cursor::BeforeStart, StepMode::Filtered, 6).unwrap();
    assert_eq!(cursor, Cursor::At(5));
    let (cursor, _) = single_step(&mut store, cursor, StepMode::Filtered, -3).unwrap();
    assert_eq!(cursor, Cursor::At(2));
    let (cursor, landing) = single_step(&mut store, cursor, StepMode::Filtered, 5).unwrap();
    assert_eq!(cursor, Cursor::At(7));
    assert_eq!(landing, Landing::Frame(7));
}

#[test]
fn a_large_backward_count_from_the_end_reports_the_beginning_once() {
    let mut store = TraceStore::new(synthetic::fibonacci(5));
    let (end, _) = single_step(&mut store, Cursor::BeforeStart, StepMode::Filtered, 999).unwrap();
    assert_eq!(end, Cursor::AtEnd);
    let (cursor, landing) = single_step(&mut store, end, StepMode::Filtered, -999).unwrap();
    assert_eq!(cursor, Cursor::BeforeStart);
    assert_eq!(landing, Landing::Beginning);
}

// =============================================================================
// Caching Off
// =============================================================================

#[test]
fn forward_stepping_works_without_caching() {
    let mut store = TraceStore::new(synthetic::fibonacci(10)).with_caching(false);
    let mut cursor = Cursor::BeforeStart;
    let mut steps = 0usize;
    loop {
        let (next, landing) = single_step(&mut store, cursor, StepMode::Filtered, 1).unwrap();
        cursor = next;
        match landing {
            Landing::Frame(_) => steps += 1,
            Landing::Terminal => break,
            other => panic!("unexpected landing {other:?}"),
        }
    }
    assert_eq!(steps, store.len());
    assert!(store.outcome().is_some());
}

// =============================================================================
// Errored Evaluations
// =============================================================================

#[test]
fn the_error_event_is_a_regular_stop_point() {
    let mut store = TraceStore::new(synthetic::failing_fibonacci(5));
    let mut cursor = Cursor::BeforeStart;
    let mut last_kind = None;
    loop {
        let (next, landing) = single_step(&mut store, cursor, StepMode::Filtered, 1).unwrap();
        cursor = next;
        match landing {
            Landing::Frame(position) => last_kind = Some(store.get(position).unwrap().kind),
            Landing::Terminal => break,
            other => panic!("unexpected landing {other:?}"),
        }
    }
    assert_eq!(last_kind, Some(EventKind::Error));
    assert!(store.outcome().unwrap().is_errored());
}
