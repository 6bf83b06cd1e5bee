//! The trace store: an append-only arena of evaluation events.
//!
//! Positions are dense indices assigned in production order. The store owns
//! the event source and pulls it lazily; nothing is produced until a caller
//! asks for a position past the known horizon.

use std::collections::VecDeque;

use metatrace_foundation::{Error, ErrorKind, Frame, Outcome, Result, UnavailableReason};

use crate::engine::{EventSource, Pulse};

/// Number of positions retained when caching is disabled: the current one
/// and the one immediately before it.
const WINDOW_SLOTS: usize = 2;

// =============================================================================
// Retention
// =============================================================================

/// How produced frames are kept.
enum Retention {
    /// Caching on: every frame is retained.
    Full(Vec<Frame>),
    /// Caching off: a sliding window of the most recent frames. `base` is
    /// the position of the oldest retained frame.
    Window { base: usize, slots: VecDeque<Frame> },
}

// =============================================================================
// Trace Store
// =============================================================================

/// The growable record of one evaluation's events.
///
/// Frames are appended in engine order and never mutated; with caching
/// disabled, frames older than the retention window are evicted as new ones
/// arrive. Once a terminal outcome or a hard engine failure is recorded the
/// source is never pulled again.
pub struct TraceStore {
    source: Box<dyn EventSource>,
    retention: Retention,
    outcome: Option<Outcome>,
    failure: Option<String>,
    last_depth: Option<usize>,
}

impl TraceStore {
    /// Creates a store over the given source, with caching enabled.
    #[must_use]
    pub fn new(source: impl EventSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            retention: Retention::Full(Vec::new()),
            outcome: None,
            failure: None,
            last_depth: None,
        }
    }

    /// Selects the retention policy.
    ///
    /// Frames evicted before the call cannot be recovered; switching an
    /// already-evicting store back to full retention keeps the window.
    #[must_use]
    pub fn with_caching(mut self, enabled: bool) -> Self {
        self.retention = match self.retention {
            Retention::Full(frames) if !enabled => {
                let base = frames.len().saturating_sub(WINDOW_SLOTS);
                let slots = frames.into_iter().skip(base).collect();
                Retention::Window { base, slots }
            }
            Retention::Window { base: 0, slots } if enabled => {
                Retention::Full(slots.into_iter().collect())
            }
            other => other,
        };
        self
    }

    /// Returns true if every produced frame is retained.
    #[must_use]
    pub fn caching_enabled(&self) -> bool {
        matches!(self.retention, Retention::Full(_))
    }

    /// Returns the number of events produced so far.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.retention {
            Retention::Full(frames) => frames.len(),
            Retention::Window { base, slots } => base + slots.len(),
        }
    }

    /// Returns true if no events have been produced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the most recently produced position, if any.
    #[must_use]
    pub fn highest_known_position(&self) -> Option<usize> {
        self.len().checked_sub(1)
    }

    /// Returns the oldest position still retained, if any.
    #[must_use]
    pub fn first_retained_position(&self) -> Option<usize> {
        match &self.retention {
            Retention::Full(frames) => {
                if frames.is_empty() {
                    None
                } else {
                    Some(0)
                }
            }
            Retention::Window { base, slots } => {
                if slots.is_empty() {
                    None
                } else {
                    Some(*base)
                }
            }
        }
    }

    /// Returns the terminal outcome, once evaluation has ended.
    #[must_use]
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Returns the frame at `position`.
    ///
    /// # Errors
    ///
    /// Returns a position-unavailable error if the position has been
    /// evicted or has not been produced yet. Callers are expected to keep
    /// this from surfacing to the user.
    pub fn get(&self, position: usize) -> Result<&Frame> {
        if position >= self.len() {
            return Err(Error::position_unavailable(
                position,
                UnavailableReason::NotProduced,
            ));
        }
        match &self.retention {
            Retention::Full(frames) => Ok(&frames[position]),
            Retention::Window { base, slots } => position
                .checked_sub(*base)
                .and_then(|slot| slots.get(slot))
                .ok_or_else(|| {
                    Error::position_unavailable(position, UnavailableReason::Evicted)
                }),
        }
    }

    /// Records one frame at the next position.
    ///
    /// # Errors
    ///
    /// Returns an engine failure if the frame violates the depth invariant:
    /// the first event must be at depth 0, and depth may grow by at most
    /// one from its predecessor. A violation poisons the store.
    pub fn append(&mut self, frame: Frame) -> Result<()> {
        self.ensure_usable()?;
        if self.outcome.is_some() {
            return Err(Error::internal("append after terminal outcome"));
        }

        let valid = match self.last_depth {
            None => frame.depth == 0,
            Some(prev) => frame.depth <= prev + 1,
        };
        if !valid {
            let message = match self.last_depth {
                None => format!("first event must be at depth 0, got {}", frame.depth),
                Some(prev) => format!(
                    "depth jumped from {prev} to {} at position {}",
                    frame.depth,
                    self.len()
                ),
            };
            self.failure = Some(message.clone());
            return Err(Error::engine(message));
        }

        self.last_depth = Some(frame.depth);
        match &mut self.retention {
            Retention::Full(frames) => frames.push(frame),
            Retention::Window { base, slots } => {
                slots.push_back(frame);
                while slots.len() > WINDOW_SLOTS {
                    slots.pop_front();
                    *base += 1;
                }
            }
        }
        Ok(())
    }

    /// Pulls the source until `position` exists, the terminal outcome is
    /// recorded, or the engine fails.
    ///
    /// # Errors
    ///
    /// Returns (and stores) the engine failure if the source fails; the
    /// failure is sticky and re-reported on every later call.
    pub fn request_through(&mut self, position: usize) -> Result<()> {
        self.ensure_usable()?;
        while self.len() <= position && self.outcome.is_none() {
            self.pull_once()?;
        }
        Ok(())
    }

    /// Pulls the source until evaluation terminates.
    ///
    /// # Errors
    ///
    /// Returns (and stores) the engine failure if the source fails.
    pub fn request_all(&mut self) -> Result<()> {
        self.ensure_usable()?;
        while self.outcome.is_none() {
            self.pull_once()?;
        }
        Ok(())
    }

    fn pull_once(&mut self) -> Result<()> {
        match self.source.next_event() {
            Ok(Pulse::Event(frame)) => self.append(frame),
            Ok(Pulse::Outcome(outcome)) => {
                self.outcome = Some(outcome);
                Ok(())
            }
            Err(e) => {
                let message = match e.kind {
                    ErrorKind::Engine(m) => m,
                    other => other.to_string(),
                };
                self.failure = Some(message.clone());
                Err(Error::engine(message))
            }
        }
    }

    fn ensure_usable(&self) -> Result<()> {
        match &self.failure {
            Some(message) => Err(Error::engine(message.clone())),
            None => Ok(()),
        }
    }
}
