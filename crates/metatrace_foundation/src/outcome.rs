//! Terminal evaluation outcomes.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The terminal result of evaluating a metaprogram.
///
/// Recorded once, after the last trace event. Forward stepping can never
/// move past it, and once it exists the evaluation engine is not consulted
/// again.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Outcome {
    /// Evaluation completed and produced a result type.
    Finished {
        /// The fully evaluated result, e.g. `int_<55>`.
        result: String,
    },
    /// Evaluation failed with a diagnostic.
    Errored {
        /// The engine's diagnostic message.
        message: String,
    },
}

impl Outcome {
    /// Creates a finished outcome.
    #[must_use]
    pub fn finished(result: impl Into<String>) -> Self {
        Self::Finished {
            result: result.into(),
        }
    }

    /// Creates an errored outcome.
    #[must_use]
    pub fn errored(message: impl Into<String>) -> Self {
        Self::Errored {
            message: message.into(),
        }
    }

    /// Returns true if evaluation failed.
    #[must_use]
    pub fn is_errored(&self) -> bool {
        matches!(self, Self::Errored { .. })
    }
}
