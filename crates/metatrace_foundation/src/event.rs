//! Instantiation event kinds.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The kind of one evaluation event.
///
/// The set is closed: every event the evaluation engine can report falls
/// into exactly one of these kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EventKind {
    /// A new instantiation begins; its nested events follow at greater depth.
    TemplateInstantiation,
    /// An instantiation identical to an already-evaluated one is
    /// re-referenced; the cached result is reused and no new work happens.
    Memoization,
    /// A non-template type, evaluated trivially.
    NonTemplateType,
    /// An intermediate argument-substitution step with no independent result.
    DeducedTemplateArgumentSubstitution,
    /// Evaluation failed somewhere in this event's subtree.
    Error,
}

impl EventKind {
    /// Returns the display name of this kind as a static string.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::TemplateInstantiation => "TemplateInstantiation",
            Self::Memoization => "Memoization",
            Self::NonTemplateType => "NonTemplateType",
            Self::DeducedTemplateArgumentSubstitution => "DeducedTemplateArgumentSubstitution",
            Self::Error => "Error",
        }
    }

    /// Returns true for memoized re-references.
    #[must_use]
    pub fn is_memoization(self) -> bool {
        matches!(self, Self::Memoization)
    }

    /// Returns true for kinds that are not legal stop points in filtered
    /// display mode.
    #[must_use]
    pub fn hidden_when_filtered(self) -> bool {
        matches!(self, Self::DeducedTemplateArgumentSubstitution)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
