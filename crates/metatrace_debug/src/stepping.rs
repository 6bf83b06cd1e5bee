//! The position cursor and the stepping algorithms.
//!
//! All operations are free functions over a trace store plus the current
//! cursor; they return the new cursor and a landing describing what the move
//! arrived at. Sessions own the cursor and render landings for display.

use metatrace_foundation::{Error, Result};
use metatrace_trace::TraceStore;

use crate::breakpoint::BreakpointSet;
use crate::config::StepMode;

// =============================================================================
// Cursor & Landings
// =============================================================================

/// The debugger's position within a trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cursor {
    /// Before the first event; the initial position of every session.
    BeforeStart,
    /// On the event at this trace position.
    At(usize),
    /// Past the last event; the terminal outcome has been reached.
    AtEnd,
}

/// What a stepping operation arrived at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Landing {
    /// A displayed frame at this trace position.
    Frame(usize),
    /// The terminal outcome, reached now or re-reported.
    Terminal,
    /// Moved back past the first event.
    Beginning,
    /// Nothing to display: a zero-count step at the start or the end.
    Silent,
}

/// Where a free run stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stop {
    /// A frame matching an active breakpoint.
    Breakpoint {
        /// The trace position of the matching frame.
        position: usize,
        /// The id of the breakpoint that matched.
        id: usize,
    },
    /// The terminal outcome.
    Terminal,
}

// =============================================================================
// Single Step
// =============================================================================

/// Moves `count` displayed events forward (positive), backward (negative),
/// or re-displays the current frame (zero).
///
/// Running past the terminal outcome or the beginning clamps there and
/// reports it once, not once per remaining unit.
///
/// # Errors
///
/// Returns the caching-required error on backward movement from a frame
/// while caching is disabled, without moving; propagates engine failures
/// raised while pulling new events.
pub fn single_step(
    store: &mut TraceStore,
    cursor: Cursor,
    mode: StepMode,
    count: i64,
) -> Result<(Cursor, Landing)> {
    if count == 0 {
        return Ok(redisplay(cursor));
    }
    if count > 0 {
        single_forward(store, cursor, mode, count.unsigned_abs())
    } else {
        ensure_backward_allowed(store, cursor)?;
        single_backward(store, cursor, mode, count.unsigned_abs())
    }
}

fn single_forward(
    store: &mut TraceStore,
    cursor: Cursor,
    mode: StepMode,
    units: u64,
) -> Result<(Cursor, Landing)> {
    let mut current = cursor;
    for _ in 0..units {
        let from = match current {
            Cursor::AtEnd => return Ok((Cursor::AtEnd, Landing::Terminal)),
            Cursor::BeforeStart => None,
            Cursor::At(position) => Some(position),
        };
        match next_displayed(store, mode, from)? {
            Some(position) => current = Cursor::At(position),
            None => return Ok((Cursor::AtEnd, Landing::Terminal)),
        }
    }
    Ok(finish_move(current))
}

fn single_backward(
    store: &mut TraceStore,
    cursor: Cursor,
    mode: StepMode,
    units: u64,
) -> Result<(Cursor, Landing)> {
    let mut current = cursor;
    for _ in 0..units {
        let previous = match current {
            Cursor::BeforeStart => return Ok((Cursor::BeforeStart, Landing::Beginning)),
            Cursor::AtEnd => last_displayed(store, mode)?,
            Cursor::At(position) => prev_displayed(store, mode, position)?,
        };
        current = match previous {
            Some(position) => Cursor::At(position),
            None => Cursor::BeforeStart,
        };
    }
    Ok(finish_move(current))
}

// =============================================================================
// Step Over & Step Out
// =============================================================================

/// Steps `count` times treating the current frame's entire subtree as one
/// unit: forward lands on the next displayed frame at the current depth or
/// shallower, backward on the nearest earlier such frame (the previous
/// sibling, or the parent when none precedes).
///
/// From the start position the whole metaprogram is the current call, so a
/// forward step-over runs to the terminal outcome.
///
/// # Errors
///
/// Same contract as [`single_step`].
pub fn step_over(
    store: &mut TraceStore,
    cursor: Cursor,
    mode: StepMode,
    count: i64,
) -> Result<(Cursor, Landing)> {
    step_scoped(store, cursor, mode, count, false)
}

/// Steps `count` times out of the current call: forward lands on the next
/// displayed frame strictly shallower than the current one, backward on the
/// nearest earlier such frame (the enclosing call). At depth 0 there is
/// nothing to step out to, so forward runs to the terminal outcome and
/// backward reaches the beginning.
///
/// Each of the `count` repetitions re-measures the depth at its own
/// starting frame.
///
/// # Errors
///
/// Same contract as [`single_step`].
pub fn step_out(
    store: &mut TraceStore,
    cursor: Cursor,
    mode: StepMode,
    count: i64,
) -> Result<(Cursor, Landing)> {
    step_scoped(store, cursor, mode, count, true)
}

fn step_scoped(
    store: &mut TraceStore,
    cursor: Cursor,
    mode: StepMode,
    count: i64,
    strict: bool,
) -> Result<(Cursor, Landing)> {
    if count == 0 {
        return Ok(redisplay(cursor));
    }
    if count > 0 {
        scoped_forward(store, cursor, mode, count.unsigned_abs(), strict)
    } else {
        ensure_backward_allowed(store, cursor)?;
        scoped_backward(store, cursor, mode, count.unsigned_abs(), strict)
    }
}

fn scoped_forward(
    store: &mut TraceStore,
    cursor: Cursor,
    mode: StepMode,
    units: u64,
    strict: bool,
) -> Result<(Cursor, Landing)> {
    let mut current = cursor;
    for _ in 0..units {
        let (from, limit) = match current {
            Cursor::AtEnd => return Ok((Cursor::AtEnd, Landing::Terminal)),
            Cursor::BeforeStart => (None, None),
            Cursor::At(position) => (Some(position), Some(store.get(position)?.depth)),
        };
        match forward_to_depth(store, mode, from, limit, strict)? {
            Some(position) => current = Cursor::At(position),
            None => return Ok((Cursor::AtEnd, Landing::Terminal)),
        }
    }
    Ok(finish_move(current))
}

fn scoped_backward(
    store: &mut TraceStore,
    cursor: Cursor,
    mode: StepMode,
    units: u64,
    strict: bool,
) -> Result<(Cursor, Landing)> {
    let mut current = cursor;
    for _ in 0..units {
        current = match current {
            Cursor::BeforeStart => return Ok((Cursor::BeforeStart, Landing::Beginning)),
            Cursor::AtEnd => match last_displayed(store, mode)? {
                Some(position) => Cursor::At(position),
                None => Cursor::BeforeStart,
            },
            Cursor::At(position) => {
                let limit = store.get(position)?.depth;
                match backward_to_depth(store, mode, position, limit, strict)? {
                    Some(target) => Cursor::At(target),
                    None => Cursor::BeforeStart,
                }
            }
        };
    }
    Ok(finish_move(current))
}

// =============================================================================
// Free Run
// =============================================================================

/// Runs forward until a frame matches an active breakpoint or the terminal
/// outcome is reached.
///
/// Matching scans every raw event, including events the filtered mode hides
/// from stepping; a hit on a hidden event is still a stop. The frame at the
/// starting position is excluded, so continuing from a breakpoint does not
/// immediately re-trigger it.
///
/// # Errors
///
/// Propagates engine failures raised while pulling new events.
pub fn resume(
    store: &mut TraceStore,
    cursor: Cursor,
    breakpoints: &BreakpointSet,
) -> Result<(Cursor, Stop)> {
    let mut position = match cursor {
        Cursor::AtEnd => return Ok((Cursor::AtEnd, Stop::Terminal)),
        Cursor::BeforeStart => 0,
        Cursor::At(current) => current + 1,
    };
    loop {
        store.request_through(position)?;
        if position >= store.len() {
            return Ok((Cursor::AtEnd, Stop::Terminal));
        }
        if let Some(breakpoint) = breakpoints.first_match(store.get(position)?) {
            let id = breakpoint.id();
            return Ok((Cursor::At(position), Stop::Breakpoint { position, id }));
        }
        position += 1;
    }
}

// =============================================================================
// Scans
// =============================================================================

/// Finds the next displayed position strictly after `from` (or the first
/// one when `from` is `None`), pulling the engine as needed. Returns `None`
/// when the terminal outcome intervenes.
fn next_displayed(
    store: &mut TraceStore,
    mode: StepMode,
    from: Option<usize>,
) -> Result<Option<usize>> {
    let mut position = match from {
        Some(current) => current + 1,
        None => 0,
    };
    loop {
        store.request_through(position)?;
        if position >= store.len() {
            return Ok(None);
        }
        if mode.displays(store.get(position)?.kind) {
            return Ok(Some(position));
        }
        position += 1;
    }
}

/// Finds the previous displayed position strictly before `from`. Walks
/// retained history, so callers must have checked that caching is enabled.
fn prev_displayed(store: &TraceStore, mode: StepMode, from: usize) -> Result<Option<usize>> {
    let mut position = from;
    while position > 0 {
        position -= 1;
        if mode.displays(store.get(position)?.kind) {
            return Ok(Some(position));
        }
    }
    Ok(None)
}

/// Finds the last displayed position of a fully produced trace.
fn last_displayed(store: &TraceStore, mode: StepMode) -> Result<Option<usize>> {
    prev_displayed(store, mode, store.len())
}

/// Scans displayed positions after `from` for the first frame whose depth
/// is below `limit` (strict) or at most `limit` (non-strict). A `None`
/// limit never matches, which drives the trace to its terminal outcome.
fn forward_to_depth(
    store: &mut TraceStore,
    mode: StepMode,
    from: Option<usize>,
    limit: Option<usize>,
    strict: bool,
) -> Result<Option<usize>> {
    let mut mark = from;
    while let Some(position) = next_displayed(store, mode, mark)? {
        if let Some(bound) = limit {
            let depth = store.get(position)?.depth;
            let hit = if strict { depth < bound } else { depth <= bound };
            if hit {
                return Ok(Some(position));
            }
        }
        mark = Some(position);
    }
    Ok(None)
}

/// Scans displayed positions before `from` for the nearest frame whose
/// depth is below `limit` (strict) or at most `limit` (non-strict).
fn backward_to_depth(
    store: &TraceStore,
    mode: StepMode,
    from: usize,
    limit: usize,
    strict: bool,
) -> Result<Option<usize>> {
    let mut mark = from;
    while let Some(position) = prev_displayed(store, mode, mark)? {
        let depth = store.get(position)?.depth;
        let hit = if strict { depth < limit } else { depth <= limit };
        if hit {
            return Ok(Some(position));
        }
        mark = position;
    }
    Ok(None)
}

// =============================================================================
// Shared Pieces
// =============================================================================

/// A zero-count step: re-display the current frame, or nothing at the start
/// or the end.
fn redisplay(cursor: Cursor) -> (Cursor, Landing) {
    match cursor {
        Cursor::At(position) => (cursor, Landing::Frame(position)),
        Cursor::BeforeStart | Cursor::AtEnd => (cursor, Landing::Silent),
    }
}

/// Backward movement from a frame needs retained history; from the start
/// position it only reports the beginning, which needs none.
fn ensure_backward_allowed(store: &TraceStore, cursor: Cursor) -> Result<()> {
    if matches!(cursor, Cursor::BeforeStart) || store.caching_enabled() {
        Ok(())
    } else {
        Err(Error::caching_required())
    }
}

/// Landing for a move that used up its whole count.
fn finish_move(cursor: Cursor) -> (Cursor, Landing) {
    match cursor {
        Cursor::At(position) => (cursor, Landing::Frame(position)),
        Cursor::BeforeStart => (cursor, Landing::Beginning),
        Cursor::AtEnd => (cursor, Landing::Terminal),
    }
}
