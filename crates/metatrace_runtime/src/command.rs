//! The command table and unique-prefix resolution.
//!
//! Commands are dispatched by any unambiguous prefix of their name or one of
//! their aliases: `c` runs `continue`, `bt` runs `backtrace`. A prefix shared
//! by several distinct commands is ambiguous; aliases of the same command do
//! not conflict with it.

use metatrace_foundation::{Error, ErrorKind, Result};

/// One entry of the command table.
#[derive(Debug)]
pub struct CommandSpec {
    /// The canonical command name.
    pub name: &'static str,
    /// Alternative spellings that resolve to the same command.
    pub aliases: &'static [&'static str],
    /// Usage line shown by `help`.
    pub usage: &'static str,
    /// One-line description shown by `help`.
    pub summary: &'static str,
}

/// The full command table, sorted by canonical name.
pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "backtrace",
        aliases: &["bt"],
        usage: "backtrace",
        summary: "Print the active call stack, innermost frame first",
    },
    CommandSpec {
        name: "break",
        aliases: &[],
        usage: "break list | break remove <id>",
        summary: "List or remove breakpoints",
    },
    CommandSpec {
        name: "continue",
        aliases: &[],
        usage: "continue",
        summary: "Run to the next breakpoint hit or the end of the metaprogram",
    },
    CommandSpec {
        name: "evaluate",
        aliases: &[],
        usage: "evaluate [-full] [-nocache] <program>",
        summary: "Start debugging a metaprogram (fib<N>, fail<N>, int, spec, or -)",
    },
    CommandSpec {
        name: "forwardtrace",
        aliases: &["ft"],
        usage: "forwardtrace [N]",
        summary: "Print the subtree under the cursor, at most N levels deep",
    },
    CommandSpec {
        name: "frame",
        aliases: &[],
        usage: "frame <N>",
        summary: "Print the Nth frame of the active call stack",
    },
    CommandSpec {
        name: "help",
        aliases: &[],
        usage: "help [command]",
        summary: "Show help for all commands or one command",
    },
    CommandSpec {
        name: "next",
        aliases: &[],
        usage: "next [N]",
        summary: "Alias for step over",
    },
    CommandSpec {
        name: "quit",
        aliases: &[],
        usage: "quit",
        summary: "End the debugging session",
    },
    CommandSpec {
        name: "rbreak",
        aliases: &[],
        usage: "rbreak <regex>",
        summary: "Add a breakpoint on every type name matching the regex",
    },
    CommandSpec {
        name: "replay",
        aliases: &[],
        usage: "replay <file>",
        summary: "Debug a previously saved trace dump",
    },
    CommandSpec {
        name: "savetrace",
        aliases: &[],
        usage: "savetrace <file>",
        summary: "Save the full trace to a file for offline replay",
    },
    CommandSpec {
        name: "step",
        aliases: &[],
        usage: "step [over|out] [N]",
        summary: "Step N display events; N may be negative to step backward",
    },
];

/// Looks up the command a token names.
///
/// An exact match on a name or alias wins outright; otherwise the token must
/// be a prefix of exactly one command's spellings.
///
/// # Errors
///
/// Returns an unknown-command error when nothing matches and an
/// ambiguous-command error when several distinct commands do.
pub fn resolve(token: &str) -> Result<&'static CommandSpec> {
    let mut candidates: Vec<&'static CommandSpec> = Vec::new();
    for spec in COMMANDS {
        let spellings = std::iter::once(spec.name).chain(spec.aliases.iter().copied());
        for spelling in spellings {
            if spelling == token {
                return Ok(spec);
            }
            if spelling.starts_with(token)
                && !candidates.iter().any(|found| found.name == spec.name)
            {
                candidates.push(spec);
            }
        }
    }
    match candidates.as_slice() {
        [] => Err(Error::new(ErrorKind::UnknownCommand(token.to_string()))),
        [spec] => Ok(spec),
        _ => Err(Error::new(ErrorKind::AmbiguousCommand(token.to_string()))),
    }
}

/// Parses an optional signed repeat count; absent means 1.
///
/// # Errors
///
/// Returns the invalid-integer error naming the token when it does not parse.
pub fn parse_count(token: Option<&str>) -> Result<i64> {
    match token {
        None => Ok(1),
        Some(text) => text
            .parse::<i64>()
            .map_err(|_| Error::invalid_integer(text)),
    }
}

/// Parses a required non-negative index argument.
///
/// # Errors
///
/// Returns the invalid-integer error naming the token when it does not parse.
pub fn parse_index(text: &str) -> Result<usize> {
    text.parse::<usize>()
        .map_err(|_| Error::invalid_integer(text))
}
