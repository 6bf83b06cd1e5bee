//! Display-ready command results.
//!
//! Sessions return structured items instead of formatted text so front ends
//! can choose their own presentation. The plain-text formatter lives in the
//! runtime crate.

use metatrace_foundation::Frame;

/// One renderable unit of command output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DisplayItem {
    /// A line of plain text.
    RawText(String),
    /// A trace frame.
    Frame(Frame),
    /// The result type of a finished evaluation.
    EvaluatedType(String),
    /// The error text of a failed evaluation.
    EvaluationError(String),
    /// The projected call stack, innermost frame first.
    Backtrace(Vec<Frame>),
    /// An indented subtree of the trace, top-down.
    CallGraph(Vec<CallGraphNode>),
}

impl DisplayItem {
    /// Creates a text item.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::RawText(text.into())
    }
}

/// One row of a call-graph display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallGraphNode {
    /// The frame at this row.
    pub frame: Frame,
    /// Indentation level relative to the subtree root.
    pub indent: usize,
}

impl CallGraphNode {
    /// Creates a row at the given indentation level.
    #[must_use]
    pub fn new(frame: Frame, indent: usize) -> Self {
        Self { frame, indent }
    }
}
