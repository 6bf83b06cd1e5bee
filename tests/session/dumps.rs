//! Trace dumps: capture, serialization, and offline replay.

use metatrace_debug::DebugSession;
use metatrace_runtime::TraceDump;
use metatrace_trace::synthetic;
use proptest::prelude::*;

fn dump_of(source: metatrace_trace::ScriptedSource) -> TraceDump {
    let mut session = DebugSession::with_defaults(source);
    session.complete_trace().unwrap();
    TraceDump::capture(&session).unwrap()
}

// =============================================================================
// Replay Fidelity
// =============================================================================

#[test]
fn replay_preserves_source_spans() {
    let dump = dump_of(synthetic::specialized());
    let mut original = DebugSession::with_defaults(synthetic::specialized());
    let mut replayed = DebugSession::with_defaults(dump.replay_source());
    for _ in 0..4 {
        assert_eq!(original.step(1).unwrap(), replayed.step(1).unwrap());
    }
}

#[test]
fn a_replayed_session_supports_backward_stepping_and_backtraces() {
    let dump = dump_of(synthetic::fibonacci(5));
    let mut session = DebugSession::with_defaults(dump.replay_source());
    session.step(5).unwrap();
    session.step(-2).unwrap();
    let items = session.backtrace().unwrap();
    let [metatrace_debug::DisplayItem::Backtrace(stack)] = items.as_slice() else {
        panic!("expected a backtrace, got {items:?}");
    };
    let names: Vec<&str> = stack.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["fib<1>", "fib<3>", "fib<5>"]);
}

#[test]
fn an_errored_dump_replays_to_the_same_diagnostic() {
    let dump = dump_of(synthetic::failing_fibonacci(5));
    assert!(dump.outcome().is_errored());

    let mut session = DebugSession::with_defaults(dump.replay_source());
    let mut original = DebugSession::with_defaults(synthetic::failing_fibonacci(5));
    assert_eq!(original.step(100).unwrap(), session.step(100).unwrap());
}

#[test]
fn a_dump_can_be_re_captured_from_its_own_replay() {
    let dump = dump_of(synthetic::fibonacci(7));
    let second = dump_of(dump.replay_source());
    assert_eq!(dump, second);
}

// =============================================================================
// Universal Properties
// =============================================================================

proptest! {
    /// Encoding and decoding any valid dump is lossless.
    #[test]
    fn byte_roundtrip_is_lossless(seed in any::<u64>(), events in 1usize..200) {
        let dump = dump_of(synthetic::random_tree(seed, events));
        prop_assert_eq!(dump.len(), events);
        let bytes = dump.to_bytes().unwrap();
        let restored = TraceDump::from_bytes(&bytes).unwrap();
        prop_assert_eq!(dump, restored);
    }
}
