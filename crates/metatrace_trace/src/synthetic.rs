//! Built-in synthetic metaprograms.
//!
//! The debugger ships no compiler; these builders produce the exact event
//! sequences a template-instantiation engine would report for a handful of
//! canonical programs. Every builder is deterministic, so tests and demos
//! can assert exact frames.

use std::collections::HashSet;

use metatrace_foundation::{EventKind, Frame, Outcome, SourcePosition, SourceSpan};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::engine::ScriptedSource;

/// Random trees stop descending past this depth.
const RANDOM_TREE_DEPTH_CAP: usize = 32;

/// Largest accepted `fib<N>` / `fail<N>` argument: `fib(93)` is the last
/// Fibonacci number that fits in a `u64`.
pub const MAX_FIB_ARGUMENT: u32 = 93;

// =============================================================================
// Fibonacci
// =============================================================================

/// The trace of evaluating `int_<fib<N>::value>`.
///
/// `fib` is the classic recursive metaprogram with full specializations for
/// `fib<0>` and `fib<1>`. Each use of `fib<K>::value` first instantiates
/// `fib<K>` if it has not been seen (its subtree references `fib<K-2>` then
/// `fib<K-1>`), then reports a memoized re-reference; specialized and
/// already-seen instantiations report only the re-reference. Values follow
/// `fib(0) = 0`, `fib(1) = 1`, so the result for `n = 10` is `int_<55>`.
#[must_use]
pub fn fibonacci(n: u32) -> ScriptedSource {
    let mut frames = Vec::new();
    let mut instantiated = HashSet::new();
    reference(n, 0, &mut instantiated, &mut frames);

    let result = format!("int_<{}>", fib_value(n));
    frames.push(Frame::new(
        result.clone(),
        EventKind::TemplateInstantiation,
        0,
    ));
    ScriptedSource::from_events(frames, Outcome::finished(result))
}

/// The trace of `int_<fib<N>::value>` where the `fib<0>` specialization
/// lacks its `value` member.
///
/// Evaluation proceeds exactly like [`fibonacci`] until the first use of
/// `fib<0>::value`, reports an error event there, and terminates with an
/// errored outcome. For `n == 1` the broken specialization is never reached
/// and evaluation finishes normally.
#[must_use]
pub fn failing_fibonacci(n: u32) -> ScriptedSource {
    let mut frames = Vec::new();
    let mut instantiated = HashSet::new();
    if reference_failing(n, 0, &mut instantiated, &mut frames) {
        let result = format!("int_<{}>", fib_value(n));
        frames.push(Frame::new(
            result.clone(),
            EventKind::TemplateInstantiation,
            0,
        ));
        return ScriptedSource::from_events(frames, Outcome::finished(result));
    }
    ScriptedSource::from_events(frames, Outcome::errored("no member named 'value' in 'fib<0>'"))
}

/// Emits the events for one use of `fib<k>::value`.
fn reference(k: u32, depth: usize, instantiated: &mut HashSet<u32>, frames: &mut Vec<Frame>) {
    let name = format!("fib<{k}>");
    if k > 1 && instantiated.insert(k) {
        frames.push(Frame::new(
            name.clone(),
            EventKind::TemplateInstantiation,
            depth,
        ));
        reference(k - 2, depth + 1, instantiated, frames);
        reference(k - 1, depth + 1, instantiated, frames);
    }
    frames.push(Frame::new(name, EventKind::Memoization, depth));
}

/// Like [`reference`], but aborts at the first `fib<0>` use.
///
/// Returns false once the abort happened.
fn reference_failing(
    k: u32,
    depth: usize,
    instantiated: &mut HashSet<u32>,
    frames: &mut Vec<Frame>,
) -> bool {
    let name = format!("fib<{k}>");
    if k == 0 {
        frames.push(Frame::new(name, EventKind::Error, depth));
        return false;
    }
    if k > 1 && instantiated.insert(k) {
        frames.push(Frame::new(
            name.clone(),
            EventKind::TemplateInstantiation,
            depth,
        ));
        if !reference_failing(k - 2, depth + 1, instantiated, frames)
            || !reference_failing(k - 1, depth + 1, instantiated, frames)
        {
            return false;
        }
    }
    frames.push(Frame::new(name, EventKind::Memoization, depth));
    true
}

fn fib_value(n: u32) -> u64 {
    let (mut a, mut b) = (0u64, 1u64);
    for _ in 0..n {
        // fib(94) exceeds u64::MAX; saturate rather than wrap.
        let next = a.saturating_add(b);
        a = b;
        b = next;
    }
    a
}

// =============================================================================
// Other programs
// =============================================================================

/// The trace of evaluating a plain non-template type: a single event, then
/// a finished outcome naming the type itself.
#[must_use]
pub fn plain_type(name: &str) -> ScriptedSource {
    let frames = vec![Frame::new(name, EventKind::NonTemplateType, 0)];
    ScriptedSource::from_events(frames, Outcome::finished(name))
}

/// The trace of `int_<foo<3, 1>::value>` over a partially specialized
/// `foo`, including the deduced-argument-substitution step filtered mode
/// hides. Frames carry the specialization's source span.
#[must_use]
pub fn specialized() -> ScriptedSource {
    let primary = SourceSpan::new(SourcePosition::new(1, 1), SourcePosition::new(1, 36));
    let partial = SourceSpan::new(SourcePosition::new(2, 1), SourcePosition::new(2, 76));

    let frames = vec![
        Frame::new("foo<3, 1>", EventKind::TemplateInstantiation, 0).with_span(primary),
        Frame::new("foo<N, 1>", EventKind::DeducedTemplateArgumentSubstitution, 1)
            .with_span(partial),
        Frame::new("foo<3, 1>", EventKind::Memoization, 0).with_span(primary),
        Frame::new("int_<45>", EventKind::TemplateInstantiation, 0),
    ];
    ScriptedSource::from_events(frames, Outcome::finished("int_<45>"))
}

/// A seeded random instantiation tree with `events` frames.
///
/// Depth respects the trace invariant (starts at 0, climbs by at most one,
/// climbs only out of an instantiation event) and the same seed always
/// yields the same tree. Used by benches and property tests that need big
/// valid traces without hand-writing them.
#[must_use]
pub fn random_tree(seed: u64, events: usize) -> ScriptedSource {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut frames = Vec::with_capacity(events);
    let mut depth = 0usize;
    let mut can_descend = false;

    for position in 0..events {
        let next_depth = if position == 0 {
            0
        } else {
            let roll = rng.gen_range(0..100u32);
            if can_descend && depth < RANDOM_TREE_DEPTH_CAP && roll < 55 {
                depth + 1
            } else if roll < 85 {
                depth
            } else {
                rng.gen_range(0..=depth)
            }
        };

        let kind = match rng.gen_range(0..100u32) {
            0..=49 => EventKind::TemplateInstantiation,
            50..=84 => EventKind::Memoization,
            _ => EventKind::DeducedTemplateArgumentSubstitution,
        };

        frames.push(Frame::new(
            format!("node<{}>", rng.gen_range(0..64u32)),
            kind,
            next_depth,
        ));
        depth = next_depth;
        can_descend = kind == EventKind::TemplateInstantiation;
    }

    ScriptedSource::from_events(frames, Outcome::finished("node<0>"))
}

// =============================================================================
// Lookup
// =============================================================================

/// Resolves a program spelled on the command line.
///
/// Accepted forms: `fib<N>`, `fail<N>`, `int`, `spec`. Arguments above
/// [`MAX_FIB_ARGUMENT`] are rejected: their values do not fit in a `u64`.
#[must_use]
pub fn by_name(program: &str) -> Option<ScriptedSource> {
    match program {
        "int" => return Some(plain_type("int")),
        "spec" => return Some(specialized()),
        _ => {}
    }
    if let Some(n) = angle_argument(program, "fib") {
        return (n <= MAX_FIB_ARGUMENT).then(|| fibonacci(n));
    }
    if let Some(n) = angle_argument(program, "fail") {
        return (n <= MAX_FIB_ARGUMENT).then(|| failing_fibonacci(n));
    }
    None
}

fn angle_argument(text: &str, stem: &str) -> Option<u32> {
    text.strip_prefix(stem)?
        .strip_prefix('<')?
        .strip_suffix('>')?
        .trim()
        .parse()
        .ok()
}
