//! Trace frames.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::event::EventKind;
use crate::source::SourceSpan;

/// One event in an evaluation trace.
///
/// Frames are value types: once appended to a trace they are never mutated.
/// The depth field records the nesting level at which the event occurred;
/// the implicit tree structure of the trace is recovered from the depths of
/// neighboring frames.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Frame {
    /// The type label being instantiated, e.g. `fib<7>`.
    pub name: String,
    /// What kind of event this is.
    pub kind: EventKind,
    /// Where in the metaprogram source the event points, when known.
    pub span: Option<SourceSpan>,
    /// Nesting depth; the first event of a trace is at depth 0.
    pub depth: usize,
}

impl Frame {
    /// Creates a frame with no source span.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: EventKind, depth: usize) -> Self {
        Self {
            name: name.into(),
            kind,
            span: None,
            depth,
        }
    }

    /// Attaches a source span.
    #[must_use]
    pub fn with_span(mut self, span: SourceSpan) -> Self {
        self.span = Some(span);
        self
    }

    /// Returns true if `other` refers to the same call as this frame.
    ///
    /// Two frames are the same call when their names match and both are
    /// memoized re-references or both are not. Depth and source span are
    /// ignored: the same call can recur at different nesting levels.
    #[must_use]
    pub fn same_call(&self, other: &Self) -> bool {
        self.name == other.name && self.kind.is_memoization() == other.kind.is_memoization()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(span) = &self.span {
            write!(f, " at {span}")?;
        }
        write!(f, " ({})", self.kind)
    }
}
