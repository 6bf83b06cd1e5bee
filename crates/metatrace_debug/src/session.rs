//! The debugger session: the externally visible state machine.
//!
//! A session owns the trace store, the position cursor, the breakpoint set,
//! and the fixed per-session configuration, and turns stepping results into
//! display-ready item sequences. One session debugs one evaluation; starting
//! a new evaluation means building a new session.

use metatrace_foundation::{Error, Frame, Outcome, Result};
use metatrace_trace::{EventSource, TraceStore, stack_at};

use crate::breakpoint::BreakpointSet;
use crate::config::SessionConfig;
use crate::output::{CallGraphNode, DisplayItem};
use crate::stepping::{self, Cursor, Landing, Stop};

/// An interactive debugging session over one metaprogram evaluation.
///
/// Operations are synchronous and run to completion; the only suspension
/// point is the engine pull inside the store. A hard engine failure poisons
/// the session permanently: every later operation re-reports it. An
/// evaluation error does not poison anything; it becomes the sticky terminal
/// display instead.
pub struct DebugSession {
    store: TraceStore,
    cursor: Cursor,
    config: SessionConfig,
    breakpoints: BreakpointSet,
    poisoned: Option<String>,
}

impl DebugSession {
    /// Creates a session over the given event source.
    #[must_use]
    pub fn new(source: impl EventSource + 'static, config: SessionConfig) -> Self {
        Self {
            store: TraceStore::new(source).with_caching(config.caching),
            cursor: Cursor::BeforeStart,
            config,
            breakpoints: BreakpointSet::new(),
            poisoned: None,
        }
    }

    /// Creates a session with the default configuration.
    #[must_use]
    pub fn with_defaults(source: impl EventSource + 'static) -> Self {
        Self::new(source, SessionConfig::new())
    }

    /// The fixed per-session configuration.
    #[must_use]
    pub fn config(&self) -> SessionConfig {
        self.config
    }

    /// The current position cursor.
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// The underlying trace store.
    #[must_use]
    pub fn store(&self) -> &TraceStore {
        &self.store
    }

    /// The active breakpoints.
    #[must_use]
    pub fn breakpoints(&self) -> &BreakpointSet {
        &self.breakpoints
    }

    /// The frame under the cursor, if the cursor is on one.
    #[must_use]
    pub fn current_frame(&self) -> Option<&Frame> {
        match self.cursor {
            Cursor::At(position) => self.store.get(position).ok(),
            Cursor::BeforeStart | Cursor::AtEnd => None,
        }
    }

    /// Single-steps `count` displayed events; negative counts move backward,
    /// zero re-displays the current position.
    ///
    /// # Errors
    ///
    /// Returns the caching-required error on backward movement without
    /// caching; re-reports a hard engine failure once one has occurred.
    pub fn step(&mut self, count: i64) -> Result<Vec<DisplayItem>> {
        self.guarded(|session| {
            let (cursor, landing) =
                stepping::single_step(&mut session.store, session.cursor, session.config.mode, count)?;
            session.cursor = cursor;
            session.render_landing(landing)
        })
    }

    /// Steps over `count` whole subtrees; negative counts move backward.
    ///
    /// # Errors
    ///
    /// Same contract as [`DebugSession::step`].
    pub fn step_over(&mut self, count: i64) -> Result<Vec<DisplayItem>> {
        self.guarded(|session| {
            let (cursor, landing) =
                stepping::step_over(&mut session.store, session.cursor, session.config.mode, count)?;
            session.cursor = cursor;
            session.render_landing(landing)
        })
    }

    /// Steps out of `count` enclosing calls; negative counts move backward.
    ///
    /// # Errors
    ///
    /// Same contract as [`DebugSession::step`].
    pub fn step_out(&mut self, count: i64) -> Result<Vec<DisplayItem>> {
        self.guarded(|session| {
            let (cursor, landing) =
                stepping::step_out(&mut session.store, session.cursor, session.config.mode, count)?;
            session.cursor = cursor;
            session.render_landing(landing)
        })
    }

    /// Runs forward to the next breakpoint hit or the terminal outcome.
    ///
    /// A breakpoint stop displays `Breakpoint "<pattern>" reached` followed
    /// by the matching frame; the frame at the starting position never
    /// re-triggers.
    ///
    /// # Errors
    ///
    /// Re-reports a hard engine failure once one has occurred.
    pub fn continue_(&mut self) -> Result<Vec<DisplayItem>> {
        self.guarded(|session| {
            let (cursor, stop) =
                stepping::resume(&mut session.store, session.cursor, &session.breakpoints)?;
            session.cursor = cursor;
            match stop {
                Stop::Terminal => session.terminal_display(),
                Stop::Breakpoint { position, id } => {
                    let pattern = session
                        .breakpoints
                        .get(id)
                        .map_or_else(String::new, |b| b.pattern().to_string());
                    Ok(vec![
                        DisplayItem::text(format!("Breakpoint \"{pattern}\" reached")),
                        DisplayItem::Frame(session.store.get(position)?.clone()),
                    ])
                }
            }
        })
    }

    /// Compiles and adds a breakpoint, returning its id.
    ///
    /// # Errors
    ///
    /// Returns an argument error if the pattern is not a valid regex.
    pub fn add_breakpoint(&mut self, pattern: &str) -> Result<usize> {
        self.ensure_usable()?;
        self.breakpoints.add(pattern)
    }

    /// Removes the breakpoint with the given id.
    ///
    /// # Errors
    ///
    /// Returns an argument error if no breakpoint has that id.
    pub fn remove_breakpoint(&mut self, id: usize) -> Result<()> {
        self.ensure_usable()?;
        self.breakpoints.remove(id)
    }

    /// Projects the active call stack at the cursor, innermost frame first.
    ///
    /// At the start the stack is empty; at the end this re-displays the
    /// terminal outcome.
    ///
    /// # Errors
    ///
    /// Returns the caching-required error when caching is disabled: the
    /// projection scans history the eviction window no longer holds.
    pub fn backtrace(&mut self) -> Result<Vec<DisplayItem>> {
        self.guarded(|session| match session.cursor {
            Cursor::BeforeStart => Ok(vec![DisplayItem::Backtrace(Vec::new())]),
            Cursor::AtEnd => session.terminal_display(),
            Cursor::At(position) => {
                if !session.store.caching_enabled() {
                    return Err(Error::caching_required());
                }
                Ok(vec![DisplayItem::Backtrace(stack_at(&session.store, position)?)])
            }
        })
    }

    /// Displays the subtree rooted at the cursor, indented one level per
    /// depth, pulling the engine as far as the subtree extends.
    ///
    /// From the start position the whole trace is the subtree. Rows deeper
    /// than `depth_limit` below the root are omitted but still traversed.
    /// Hidden events follow the session's mode.
    ///
    /// # Errors
    ///
    /// Returns the caching-required error when caching is disabled: the scan
    /// produces events past the cursor, which would evict the cursor's own
    /// frame from the retention window.
    pub fn forward_trace(&mut self, depth_limit: Option<usize>) -> Result<Vec<DisplayItem>> {
        self.guarded(|session| {
            let (start, root_depth) = match session.cursor {
                Cursor::AtEnd => return session.terminal_display(),
                Cursor::BeforeStart => (0, 0),
                Cursor::At(position) => (position, session.store.get(position)?.depth),
            };
            if !session.store.caching_enabled() {
                return Err(Error::caching_required());
            }

            let mut rows = Vec::new();
            let mut position = start;
            loop {
                session.store.request_through(position)?;
                if position >= session.store.len() {
                    break;
                }
                let frame = session.store.get(position)?;
                let subtree_closed = position > start
                    && frame.depth <= root_depth
                    && matches!(session.cursor, Cursor::At(_));
                if subtree_closed {
                    break;
                }
                let indent = frame.depth - root_depth;
                let within_limit = depth_limit.is_none_or(|limit| indent <= limit);
                if within_limit && session.config.mode.displays(frame.kind) {
                    rows.push(CallGraphNode::new(frame.clone(), indent));
                }
                position += 1;
            }
            Ok(vec![DisplayItem::CallGraph(rows)])
        })
    }

    /// Pulls the engine until evaluation terminates.
    ///
    /// The cursor does not move; this only extends the produced trace, e.g.
    /// before saving a trace dump.
    ///
    /// # Errors
    ///
    /// Re-reports a hard engine failure once one has occurred.
    pub fn complete_trace(&mut self) -> Result<()> {
        self.guarded(|session| session.store.request_all())
    }

    /// The terminal display: `Metaprogram finished` plus the evaluated type
    /// or the evaluation error.
    fn terminal_display(&self) -> Result<Vec<DisplayItem>> {
        let outcome = self
            .store
            .outcome()
            .ok_or_else(|| Error::internal("terminal display without a recorded outcome"))?;
        let result = match outcome {
            Outcome::Finished { result } => DisplayItem::EvaluatedType(result.clone()),
            Outcome::Errored { message } => DisplayItem::EvaluationError(message.clone()),
        };
        Ok(vec![DisplayItem::text("Metaprogram finished"), result])
    }

    fn render_landing(&self, landing: Landing) -> Result<Vec<DisplayItem>> {
        match landing {
            Landing::Silent => Ok(Vec::new()),
            Landing::Beginning => Ok(vec![DisplayItem::text(
                "Metaprogram reached the beginning",
            )]),
            Landing::Terminal => self.terminal_display(),
            Landing::Frame(position) => {
                Ok(vec![DisplayItem::Frame(self.store.get(position)?.clone())])
            }
        }
    }

    /// Runs one operation under the poison guard: a poisoned session
    /// re-reports its failure, and a fatal error poisons it.
    fn guarded<T>(&mut self, operation: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.ensure_usable()?;
        match operation(self) {
            Err(error) if error.is_fatal() => {
                if let metatrace_foundation::ErrorKind::Engine(message) = &error.kind {
                    self.poisoned = Some(message.clone());
                }
                Err(error)
            }
            other => other,
        }
    }

    fn ensure_usable(&self) -> Result<()> {
        match &self.poisoned {
            Some(message) => Err(Error::engine(message.clone())),
            None => Ok(()),
        }
    }
}
