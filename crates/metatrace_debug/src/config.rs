//! Per-session settings: stepping mode and caching policy.

use metatrace_foundation::EventKind;

// =============================================================================
// Step Mode
// =============================================================================

/// Which trace events are legal stop points.
///
/// Filtered mode hides deduced-argument substitutions: they carry no
/// independent result, so stopping on each one is noise. Full mode stops on
/// every recorded event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StepMode {
    /// Skip deduced-argument-substitution events when stepping.
    #[default]
    Filtered,
    /// Stop on every event.
    Full,
}

impl StepMode {
    /// Returns true if events of this kind are stop points in this mode.
    #[must_use]
    pub fn displays(self, kind: EventKind) -> bool {
        match self {
            Self::Full => true,
            Self::Filtered => !kind.hidden_when_filtered(),
        }
    }
}

// =============================================================================
// Session Config
// =============================================================================

/// Settings fixed when a session is created.
///
/// Mode and caching never change over a session's lifetime; starting a new
/// evaluation is the only way to switch either.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// The stepping mode.
    pub mode: StepMode,
    /// Whether the trace store retains full history.
    ///
    /// Without caching only a two-slot window of recent frames is kept and
    /// backward navigation is unavailable.
    pub caching: bool,
}

impl SessionConfig {
    /// Creates the default configuration: filtered mode, caching enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mode: StepMode::Filtered,
            caching: true,
        }
    }

    /// Sets the stepping mode.
    #[must_use]
    pub fn with_mode(mut self, mode: StepMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the caching policy.
    #[must_use]
    pub fn with_caching(mut self, caching: bool) -> Self {
        self.caching = caching;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}
