//! The boundary between the debugger and an evaluation engine.
//!
//! The debugger never runs instantiation itself; it pulls events one at a
//! time from an [`EventSource`]. Sources are synchronous: a pull blocks
//! until the engine has something to report.

use std::collections::VecDeque;

use metatrace_foundation::{Error, Frame, Outcome, Result};

// =============================================================================
// Pulse
// =============================================================================

/// One result of pulling the evaluation engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Pulse {
    /// The next trace event.
    Event(Frame),
    /// Evaluation ended; no further events will ever be produced.
    Outcome(Outcome),
}

// =============================================================================
// EventSource
// =============================================================================

/// A pull-driven producer of evaluation events.
///
/// Returning `Err` signals a hard engine failure unrelated to the
/// metaprogram being evaluated. The caller must not pull again afterwards;
/// the failure is not retryable.
pub trait EventSource {
    /// Produces the next event or the terminal outcome.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine itself fails (crash, lost
    /// connection). Metaprogram evaluation errors are not engine failures;
    /// they arrive as [`Outcome::Errored`].
    fn next_event(&mut self) -> Result<Pulse>;
}

// =============================================================================
// ScriptedSource
// =============================================================================

/// An event source that replays a prepared pulse sequence.
///
/// This is the engine used for the built-in synthetic metaprograms and for
/// replaying saved trace dumps; tests also use it to script exact engine
/// behavior, including injected hard failures.
#[derive(Debug)]
pub struct ScriptedSource {
    pulses: VecDeque<Pulse>,
    failure: Option<String>,
}

impl ScriptedSource {
    /// Creates a source that plays the given pulses in order.
    #[must_use]
    pub fn new(pulses: impl IntoIterator<Item = Pulse>) -> Self {
        Self {
            pulses: pulses.into_iter().collect(),
            failure: None,
        }
    }

    /// Creates a source from an event list followed by a terminal outcome.
    #[must_use]
    pub fn from_events(frames: impl IntoIterator<Item = Frame>, outcome: Outcome) -> Self {
        let mut pulses: VecDeque<Pulse> = frames.into_iter().map(Pulse::Event).collect();
        pulses.push_back(Pulse::Outcome(outcome));
        Self {
            pulses,
            failure: None,
        }
    }

    /// Makes the source fail hard once its pulses are exhausted.
    #[must_use]
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Creates a source that fails hard on the first pull.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self::new([]).with_failure(message)
    }

    /// Returns the number of pulses left to play.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.pulses.len()
    }
}

impl EventSource for ScriptedSource {
    fn next_event(&mut self) -> Result<Pulse> {
        match self.pulses.pop_front() {
            Some(pulse) => Ok(pulse),
            None => match &self.failure {
                Some(message) => Err(Error::engine(message.clone())),
                None => Err(Error::engine(
                    "event source exhausted before reporting an outcome",
                )),
            },
        }
    }
}
