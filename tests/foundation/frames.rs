//! Frames, event kinds, and terminal outcomes.

use metatrace_foundation::{EventKind, Frame, Outcome, SourcePosition, SourceSpan};

// =============================================================================
// Frame Display
// =============================================================================

#[test]
fn frame_display_names_the_kind() {
    let frame = Frame::new("vector<int>", EventKind::TemplateInstantiation, 0);
    assert_eq!(format!("{frame}"), "vector<int> (TemplateInstantiation)");
}

#[test]
fn frame_display_includes_the_span_when_present() {
    let span = SourceSpan::new(SourcePosition::new(2, 1), SourcePosition::new(2, 76));
    let frame = Frame::new("foo<N, 1>", EventKind::DeducedTemplateArgumentSubstitution, 1)
        .with_span(span);
    assert_eq!(
        format!("{frame}"),
        "foo<N, 1> at 2:1-2:76 (DeducedTemplateArgumentSubstitution)"
    );
}

// =============================================================================
// Call Identity
// =============================================================================

#[test]
fn instantiation_and_memoization_of_one_name_are_different_calls() {
    let inst = Frame::new("fib<3>", EventKind::TemplateInstantiation, 1);
    let memo = Frame::new("fib<3>", EventKind::Memoization, 1);
    assert!(!inst.same_call(&memo));
}

#[test]
fn same_call_survives_relocation() {
    // The identical instantiation re-referenced at a different depth and
    // source location is still the same call.
    let a = Frame::new("fib<2>", EventKind::Memoization, 2);
    let b = Frame::new("fib<2>", EventKind::Memoization, 3)
        .with_span(SourceSpan::point(SourcePosition::new(4, 9)));
    assert!(a.same_call(&b));
}

#[test]
fn error_and_non_template_events_compare_like_instantiations() {
    let error = Frame::new("fib<0>", EventKind::Error, 2);
    let plain = Frame::new("fib<0>", EventKind::NonTemplateType, 2);
    // Neither is a memoization, so name equality decides.
    assert!(error.same_call(&plain));
}

// =============================================================================
// Filtering
// =============================================================================

#[test]
fn every_kind_except_deduced_substitution_is_a_stop_point() {
    let visible = [
        EventKind::TemplateInstantiation,
        EventKind::Memoization,
        EventKind::NonTemplateType,
        EventKind::Error,
    ];
    for kind in visible {
        assert!(!kind.hidden_when_filtered(), "{kind}");
    }
    assert!(EventKind::DeducedTemplateArgumentSubstitution.hidden_when_filtered());
}

// =============================================================================
// Outcomes
// =============================================================================

#[test]
fn outcomes_distinguish_success_from_failure() {
    let finished = Outcome::finished("int_<55>");
    let errored = Outcome::errored("no member named 'value' in 'fib<0>'");
    assert!(!finished.is_errored());
    assert!(errored.is_errored());
    assert_ne!(finished, errored);
}
