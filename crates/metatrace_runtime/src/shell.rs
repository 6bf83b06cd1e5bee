//! The interactive `(mdb)` command shell.

use std::io::{self, Write};

use metatrace_debug::{DebugSession, DisplayItem, SessionConfig, StepMode};
use metatrace_foundation::{Error, ErrorContext, Result};
use metatrace_trace::synthetic;

use crate::command::{self, COMMANDS, CommandSpec};
use crate::dump::TraceDump;
use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::format::render;

/// The interactive debugger shell.
///
/// Holds at most one live session; `evaluate` replaces it and `quit` ends
/// the loop. An empty input line repeats the previous command, gdb-style; a
/// line of only whitespace does nothing.
pub struct Shell<E: LineEditor = RustylineEditor> {
    editor: E,
    session: Option<DebugSession>,
    last_program: Option<String>,
    last_line: Option<String>,
    prompt: String,
    show_banner: bool,
    done: bool,
}

impl Shell<RustylineEditor> {
    /// Creates a shell with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new() -> Result<Self> {
        let editor = RustylineEditor::new()?;
        Ok(Self::with_editor(editor))
    }
}

impl<E: LineEditor> Shell<E> {
    /// Creates a shell with the given editor.
    pub fn with_editor(editor: E) -> Self {
        Self {
            editor,
            session: None,
            last_program: None,
            last_line: None,
            prompt: "(mdb) ".to_string(),
            show_banner: true,
            done: false,
        }
    }

    /// Disables the welcome banner.
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Returns a reference to the live session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&DebugSession> {
        self.session.as_ref()
    }

    /// Returns true once `quit` has been executed.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Runs the shell loop until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails fatally. Command errors are
    /// printed, not propagated.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            self.print_banner();
        }

        while !self.done {
            match self.editor.read_line(&self.prompt)? {
                ReadResult::Line(line) => {
                    for text in self.step_line(&line) {
                        println!("{text}");
                    }
                }
                ReadResult::Interrupted => println!(),
                ReadResult::Eof => break,
            }
        }

        println!("\nGoodbye!");
        Ok(())
    }

    /// Processes one raw input line, applying history and repeat handling,
    /// and returns the lines to print.
    pub fn step_line(&mut self, line: &str) -> Vec<String> {
        // An empty line repeats the last command; whitespace does nothing.
        let effective = if line.is_empty() {
            match &self.last_line {
                Some(previous) => previous.clone(),
                None => return Vec::new(),
            }
        } else {
            if line.trim().is_empty() {
                return Vec::new();
            }
            self.editor.add_history(line);
            self.last_line = Some(line.to_string());
            line.to_string()
        };

        match self.execute(&effective) {
            Ok(lines) => lines,
            Err(error) => vec![format!("Error: {error}")],
        }
    }

    /// Parses and executes one command line.
    ///
    /// # Errors
    ///
    /// Returns unknown/ambiguous-command errors, argument errors, and any
    /// error the session reports. Errors raised past command resolution
    /// carry the resolved command name as context.
    pub fn execute(&mut self, line: &str) -> Result<Vec<String>> {
        let mut words = line.split_whitespace();
        let Some(token) = words.next() else {
            return Ok(Vec::new());
        };
        let spec = command::resolve(token)?;
        let args: Vec<&str> = words.collect();

        self.dispatch(spec.name, &args)
            .map_err(|error| error.with_context(ErrorContext::new().with_command(spec.name)))
    }

    fn dispatch(&mut self, name: &str, args: &[&str]) -> Result<Vec<String>> {
        match name {
            "evaluate" => self.cmd_evaluate(args),
            "step" => self.cmd_step(args),
            "next" => self.cmd_next(args),
            "continue" => self.cmd_continue(args),
            "rbreak" => self.cmd_rbreak(args),
            "break" => self.cmd_break(args),
            "backtrace" => self.cmd_backtrace(args),
            "forwardtrace" => self.cmd_forwardtrace(args),
            "frame" => self.cmd_frame(args),
            "savetrace" => self.cmd_savetrace(args),
            "replay" => self.cmd_replay(args),
            "help" => Self::cmd_help(args),
            "quit" => {
                self.expect_no_args(args, "quit")?;
                self.done = true;
                self.session = None;
                Ok(Vec::new())
            }
            other => Err(Error::internal(format!("unhandled command {other}"))),
        }
    }

    fn cmd_evaluate(&mut self, args: &[&str]) -> Result<Vec<String>> {
        let mut config = SessionConfig::new();
        let mut program = None;
        for arg in args {
            match *arg {
                "-full" => config = config.with_mode(StepMode::Full),
                "-nocache" => config = config.with_caching(false),
                name if program.is_none() => program = Some(name.to_string()),
                extra => {
                    return Err(Error::argument(format!("Unexpected argument \"{extra}\"")));
                }
            }
        }
        let Some(mut program) = program else {
            return Err(Error::argument("Argument expected"));
        };
        if program == "-" {
            program = self
                .last_program
                .clone()
                .ok_or_else(Error::not_evaluated)?;
        }
        let source = synthetic::by_name(&program).ok_or_else(|| {
            Error::argument(format!(
                "Unknown metaprogram \"{program}\" (expected fib<N>, fail<N>, int, or spec)"
            ))
        })?;

        self.session = Some(DebugSession::new(source, config));
        self.last_program = Some(program);
        Ok(vec!["Metaprogram started".to_string()])
    }

    fn cmd_step(&mut self, args: &[&str]) -> Result<Vec<String>> {
        let (scope, count_arg) = match args {
            [] => (None, None),
            ["over", rest @ ..] => (Some("over"), rest.first()),
            ["out", rest @ ..] => (Some("out"), rest.first()),
            [count] => (None, Some(count)),
            _ => return Err(Error::argument("Usage: step [over|out] [N]")),
        };
        if matches!(args, ["over" | "out", _, _, ..]) {
            return Err(Error::argument("Usage: step [over|out] [N]"));
        }
        let count = command::parse_count(count_arg.copied())?;
        let session = self.require_session()?;
        let items = match scope {
            None => session.step(count)?,
            Some("over") => session.step_over(count)?,
            Some(_) => session.step_out(count)?,
        };
        Ok(render(&items))
    }

    fn cmd_next(&mut self, args: &[&str]) -> Result<Vec<String>> {
        let count_arg = match args {
            [] => None,
            [count] => Some(*count),
            _ => return Err(Error::argument("Usage: next [N]")),
        };
        let count = command::parse_count(count_arg)?;
        let session = self.require_session()?;
        Ok(render(&session.step_over(count)?))
    }

    fn cmd_continue(&mut self, args: &[&str]) -> Result<Vec<String>> {
        self.expect_no_args(args, "continue")?;
        let session = self.require_session()?;
        Ok(render(&session.continue_()?))
    }

    fn cmd_rbreak(&mut self, args: &[&str]) -> Result<Vec<String>> {
        let [pattern] = args else {
            return Err(Error::argument("Usage: rbreak <regex>"));
        };
        let pattern = (*pattern).to_string();
        let session = self.require_session()?;
        session.add_breakpoint(&pattern)?;
        Ok(vec![format!("Breakpoint \"{pattern}\" added")])
    }

    fn cmd_break(&mut self, args: &[&str]) -> Result<Vec<String>> {
        match args {
            ["list"] => {
                let session = self.require_session()?;
                if session.breakpoints().is_empty() {
                    return Ok(vec!["No breakpoints currently set".to_string()]);
                }
                Ok(session
                    .breakpoints()
                    .iter()
                    .map(ToString::to_string)
                    .collect())
            }
            ["remove", id] => {
                let id = command::parse_index(id)?;
                let session = self.require_session()?;
                session.remove_breakpoint(id)?;
                Ok(vec![format!("Breakpoint {id} removed")])
            }
            _ => Err(Error::argument("Usage: break list | break remove <id>")),
        }
    }

    fn cmd_backtrace(&mut self, args: &[&str]) -> Result<Vec<String>> {
        self.expect_no_args(args, "backtrace")?;
        let session = self.require_session()?;
        Ok(render(&session.backtrace()?))
    }

    fn cmd_forwardtrace(&mut self, args: &[&str]) -> Result<Vec<String>> {
        let limit = match args {
            [] => None,
            [depth] => Some(command::parse_index(depth)?),
            _ => return Err(Error::argument("Usage: forwardtrace [N]")),
        };
        let session = self.require_session()?;
        Ok(render(&session.forward_trace(limit)?))
    }

    fn cmd_frame(&mut self, args: &[&str]) -> Result<Vec<String>> {
        let [index] = args else {
            return Err(Error::argument("Usage: frame <N>"));
        };
        let index = command::parse_index(index)?;
        let session = self.require_session()?;
        let items = session.backtrace()?;
        match items.first() {
            Some(DisplayItem::Backtrace(stack)) => {
                let frame = stack
                    .get(index)
                    .ok_or_else(|| Error::argument(format!("No frame {index}")))?;
                Ok(vec![format!("#{index} {frame}")])
            }
            // At the end of the trace there is no stack; show the terminal.
            _ => Ok(render(&items)),
        }
    }

    fn cmd_savetrace(&mut self, args: &[&str]) -> Result<Vec<String>> {
        let [path] = args else {
            return Err(Error::argument("Usage: savetrace <file>"));
        };
        let path = (*path).to_string();
        let session = self.require_session()?;
        session.complete_trace()?;
        let dump = TraceDump::capture(session)?;
        dump.save_to_file(&path)?;
        Ok(vec![format!("Trace saved to {path}")])
    }

    fn cmd_replay(&mut self, args: &[&str]) -> Result<Vec<String>> {
        let [path] = args else {
            return Err(Error::argument("Usage: replay <file>"));
        };
        let dump = TraceDump::load_from_file(path)?;
        self.session = Some(DebugSession::with_defaults(dump.replay_source()));
        Ok(vec!["Metaprogram started".to_string()])
    }

    fn cmd_help(args: &[&str]) -> Result<Vec<String>> {
        match args {
            [] => {
                let mut lines = vec!["Available commands:".to_string()];
                for spec in COMMANDS {
                    lines.push(format!("  {:<36} {}", spec.usage, spec.summary));
                }
                lines.push(String::new());
                lines.push(
                    "Commands may be abbreviated to any unambiguous prefix.".to_string(),
                );
                Ok(lines)
            }
            [token] => {
                let spec = command::resolve(token)?;
                Ok(help_for(spec))
            }
            _ => Err(Error::argument("Usage: help [command]")),
        }
    }

    fn require_session(&mut self) -> Result<&mut DebugSession> {
        self.session.as_mut().ok_or_else(Error::not_evaluated)
    }

    #[allow(clippy::unused_self)]
    fn expect_no_args(&self, args: &[&str], name: &str) -> Result<()> {
        if args.is_empty() {
            Ok(())
        } else {
            Err(Error::argument(format!("{name} takes no arguments")))
        }
    }

    #[allow(clippy::unused_self)]
    fn print_banner(&self) {
        println!(
            "Metatrace metadebugger v{}",
            env!("CARGO_PKG_VERSION")
        );
        println!("For help, type \"help\". Use Ctrl+D to exit.\n");
        let _ = io::stdout().flush();
    }
}

fn help_for(spec: &CommandSpec) -> Vec<String> {
    let mut lines = vec![format!("Usage: {}", spec.usage), spec.summary.to_string()];
    if !spec.aliases.is_empty() {
        lines.push(format!("Aliases: {}", spec.aliases.join(", ")));
    }
    lines
}
