//! Free runs: resume until a breakpoint hit or the terminal outcome.

use metatrace_debug::stepping::resume;
use metatrace_debug::{BreakpointSet, Cursor, Stop};
use metatrace_trace::{TraceStore, synthetic};

// =============================================================================
// Breakpoint Matching
// =============================================================================

#[test]
fn multiple_breakpoints_match_as_a_union() {
    let mut store = TraceStore::new(synthetic::fibonacci(5));
    let mut breakpoints = BreakpointSet::new();
    let int_id = breakpoints.add("int_").unwrap();
    let fib4_id = breakpoints.add("fib<4>").unwrap();

    let (cursor, stop) = resume(&mut store, Cursor::BeforeStart, &breakpoints).unwrap();
    assert_eq!(stop, Stop::Breakpoint { position: 8, id: fib4_id });
    let (cursor, stop) = resume(&mut store, cursor, &breakpoints).unwrap();
    assert_eq!(stop, Stop::Breakpoint { position: 11, id: fib4_id });
    let (cursor, stop) = resume(&mut store, cursor, &breakpoints).unwrap();
    assert_eq!(stop, Stop::Breakpoint { position: 13, id: int_id });
    let (_, stop) = resume(&mut store, cursor, &breakpoints).unwrap();
    assert_eq!(stop, Stop::Terminal);
}

#[test]
fn anchored_patterns_stop_only_on_exact_names() {
    let mut store = TraceStore::new(synthetic::fibonacci(5));
    let mut breakpoints = BreakpointSet::new();
    breakpoints.add("^fib<3>$").unwrap();

    let mut hits = Vec::new();
    let mut cursor = Cursor::BeforeStart;
    loop {
        let (next, stop) = resume(&mut store, cursor, &breakpoints).unwrap();
        cursor = next;
        match stop {
            Stop::Breakpoint { position, .. } => hits.push(position),
            Stop::Terminal => break,
        }
    }
    assert_eq!(hits, vec![1, 7, 10]);
}

#[test]
fn a_removed_breakpoint_no_longer_stops_the_run() {
    let mut store = TraceStore::new(synthetic::fibonacci(5));
    let mut breakpoints = BreakpointSet::new();
    let id = breakpoints.add("fib").unwrap();
    breakpoints.remove(id).unwrap();

    let (cursor, stop) = resume(&mut store, Cursor::BeforeStart, &breakpoints).unwrap();
    assert_eq!(cursor, Cursor::AtEnd);
    assert_eq!(stop, Stop::Terminal);
}

#[test]
fn ids_keep_growing_after_removal() {
    let mut breakpoints = BreakpointSet::new();
    let first = breakpoints.add("a").unwrap();
    breakpoints.remove(first).unwrap();
    let second = breakpoints.add("b").unwrap();
    assert_eq!(first, 1);
    assert_eq!(second, 2);
    assert!(breakpoints.get(first).is_none());
}

// =============================================================================
// Caching Off
// =============================================================================

#[test]
fn resume_works_without_caching() {
    let mut store = TraceStore::new(synthetic::fibonacci(10)).with_caching(false);
    let mut breakpoints = BreakpointSet::new();
    breakpoints.add("^int_").unwrap();

    let (cursor, stop) = resume(&mut store, Cursor::BeforeStart, &breakpoints).unwrap();
    let Cursor::At(position) = cursor else {
        panic!("expected a breakpoint stop, got {stop:?}");
    };
    assert_eq!(store.get(position).unwrap().name, "int_<55>");
}

// =============================================================================
// Invalid Patterns
// =============================================================================

#[test]
fn an_invalid_regex_is_rejected_with_the_pattern_quoted() {
    let mut breakpoints = BreakpointSet::new();
    let err = breakpoints.add("fib<(").unwrap_err();
    assert!(format!("{err}").contains("\"fib<(\" is not a valid regex"));
    assert!(breakpoints.is_empty());
}
