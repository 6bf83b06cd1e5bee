//! Breakpoints: regex patterns matched against frame names.

use std::fmt;

use metatrace_foundation::{Error, Frame, Result};
use regex::Regex;

// =============================================================================
// Breakpoint
// =============================================================================

/// A single breakpoint.
///
/// The pattern is a regular expression applied to frame names with an
/// unanchored search, so `fib` matches every `fib<N>` frame while `^fib<3>$`
/// matches exactly one name.
#[derive(Clone, Debug)]
pub struct Breakpoint {
    id: usize,
    pattern: String,
    regex: Regex,
}

impl Breakpoint {
    fn compile(id: usize, pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|_| Error::argument(format!("\"{pattern}\" is not a valid regex")))?;
        Ok(Self {
            id,
            pattern: pattern.to_string(),
            regex,
        })
    }

    /// The identifier assigned when the breakpoint was added.
    #[must_use]
    pub fn id(&self) -> usize {
        self.id
    }

    /// The pattern text as the user wrote it.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns true if the frame's name contains a match for the pattern.
    #[must_use]
    pub fn matches(&self, frame: &Frame) -> bool {
        self.regex.is_match(&frame.name)
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Breakpoint {}: regex(\"{}\")", self.id, self.pattern)
    }
}

// =============================================================================
// Breakpoint Set
// =============================================================================

/// An ordered collection of breakpoints; matching ORs over all of them.
///
/// Ids are assigned from 1 in insertion order and are never reused, so a
/// removed breakpoint's id stays dead for the session.
#[derive(Clone, Debug)]
pub struct BreakpointSet {
    breakpoints: Vec<Breakpoint>,
    next_id: usize,
}

impl BreakpointSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            breakpoints: Vec::new(),
            next_id: 1,
        }
    }

    /// Compiles and adds a breakpoint, returning its id.
    ///
    /// # Errors
    ///
    /// Returns an argument error naming the pattern if it is not a valid
    /// regular expression.
    pub fn add(&mut self, pattern: &str) -> Result<usize> {
        let breakpoint = Breakpoint::compile(self.next_id, pattern)?;
        let id = breakpoint.id;
        self.next_id += 1;
        self.breakpoints.push(breakpoint);
        Ok(id)
    }

    /// Removes the breakpoint with the given id.
    ///
    /// # Errors
    ///
    /// Returns an argument error if no breakpoint has that id.
    pub fn remove(&mut self, id: usize) -> Result<()> {
        let before = self.breakpoints.len();
        self.breakpoints.retain(|breakpoint| breakpoint.id != id);
        if self.breakpoints.len() == before {
            return Err(Error::argument(format!("No breakpoint with id {id}")));
        }
        Ok(())
    }

    /// Looks up a breakpoint by id.
    #[must_use]
    pub fn get(&self, id: usize) -> Option<&Breakpoint> {
        self.breakpoints.iter().find(|breakpoint| breakpoint.id == id)
    }

    /// Returns the first breakpoint matching the frame, if any.
    #[must_use]
    pub fn first_match(&self, frame: &Frame) -> Option<&Breakpoint> {
        self.breakpoints
            .iter()
            .find(|breakpoint| breakpoint.matches(frame))
    }

    /// Iterates breakpoints in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Breakpoint> {
        self.breakpoints.iter()
    }

    /// The number of active breakpoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.breakpoints.len()
    }

    /// Returns true if no breakpoints are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.breakpoints.is_empty()
    }
}

impl Default for BreakpointSet {
    fn default() -> Self {
        Self::new()
    }
}
