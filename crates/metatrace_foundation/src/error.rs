//! Error types for the Metatrace system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

/// Convenience alias for results using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Metatrace operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a position-unavailable error.
    #[must_use]
    pub fn position_unavailable(position: usize, reason: UnavailableReason) -> Self {
        Self::new(ErrorKind::PositionUnavailable { position, reason })
    }

    /// Creates a caching-required error.
    #[must_use]
    pub fn caching_required() -> Self {
        Self::new(ErrorKind::CachingRequired)
    }

    /// Creates an invalid-integer error for a malformed count argument.
    #[must_use]
    pub fn invalid_integer(token: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInteger {
            token: token.into(),
        })
    }

    /// Creates a hard engine failure error.
    #[must_use]
    pub fn engine(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Engine(message.into()))
    }

    /// Creates a metaprogram-not-evaluated error.
    #[must_use]
    pub fn not_evaluated() -> Self {
        Self::new(ErrorKind::NotEvaluated)
    }

    /// Creates an argument error with the given message.
    #[must_use]
    pub fn argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Argument(message.into()))
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }

    /// Returns true if this error poisons the session.
    ///
    /// Hard engine failures are unrelated to the metaprogram being debugged
    /// and are never retried; every later operation re-reports them.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self.kind, ErrorKind::Engine(_))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A trace position that is not currently materialized.
    ///
    /// Never shown to the user: the stepping engine's bookkeeping must keep
    /// it from requesting evicted or unproduced positions.
    #[error("position {position} unavailable ({reason})")]
    PositionUnavailable {
        /// The requested trace position.
        position: usize,
        /// Why the position is missing.
        reason: UnavailableReason,
    },

    /// Backward movement was requested while caching is disabled.
    #[error("Caching is disabled in the debugger and stepping backwards requires caching.")]
    CachingRequired,

    /// A count argument could not be parsed as an integer.
    #[error("Invalid integer: {token}")]
    InvalidInteger {
        /// The token that failed to parse.
        token: String,
    },

    /// The evaluation engine failed for a reason unrelated to the
    /// metaprogram (crash, lost connection). Fatal to the session.
    #[error("Evaluation engine failed: {0}")]
    Engine(String),

    /// A command needing a debugged metaprogram ran without one.
    #[error("Metaprogram not evaluated yet")]
    NotEvaluated,

    /// No command matches the given name or prefix.
    #[error("Command \"{0}\" is unknown")]
    UnknownCommand(String),

    /// More than one command matches the given prefix.
    #[error("Command \"{0}\" is ambiguous")]
    AmbiguousCommand(String),

    /// A command argument was missing, unexpected, or out of range.
    #[error("{0}")]
    Argument(String),

    /// An I/O operation failed.
    #[error("io error: {0}")]
    Io(String),

    /// Encoding or decoding a trace dump failed.
    #[error("trace dump error: {0}")]
    TraceDump(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Why a trace position is not materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnavailableReason {
    /// The position was discarded by the no-caching eviction window.
    Evicted,
    /// The engine has not produced the position yet.
    NotProduced,
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Evicted => write!(f, "evicted"),
            Self::NotProduced => write!(f, "not produced"),
        }
    }
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The command being executed.
    pub command: Option<String>,
    /// The trace position involved.
    pub position: Option<usize>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the command name.
    #[must_use]
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Sets the trace position.
    #[must_use]
    pub fn with_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(command) = &self.command {
            write!(f, "in command {command}")?;
        }
        if let Some(position) = self.position {
            if self.command.is_some() {
                write!(f, " ")?;
            }
            write!(f, "at position {position}")?;
        }
        Ok(())
    }
}
