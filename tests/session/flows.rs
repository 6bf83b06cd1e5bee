//! Complete shell conversations, line by line.

use metatrace_foundation::Result;
use metatrace_runtime::{LineEditor, ReadResult, Shell};

/// An inert editor; these tests feed lines through `step_line` directly,
/// so the shell under test never touches a terminal.
struct ScriptEditor;

impl LineEditor for ScriptEditor {
    fn read_line(&mut self, _prompt: &str) -> Result<ReadResult> {
        Ok(ReadResult::Eof)
    }

    fn add_history(&mut self, _line: &str) {}
}

fn shell() -> Shell<ScriptEditor> {
    Shell::with_editor(ScriptEditor)
}

/// Feeds each line through the shell and returns all printed output.
fn converse(lines: &[&str]) -> Vec<String> {
    let mut shell = shell();
    let mut output = Vec::new();
    for line in lines {
        output.extend(shell.step_line(line));
    }
    output
}

// =============================================================================
// End-to-End Scenarios
// =============================================================================

#[test]
fn a_breakpoint_driven_debugging_session() {
    let output = converse(&[
        "evaluate fib<5>",
        "rbreak fib<4>",
        "continue",
        "bt",
        "continue",
        "continue",
    ]);
    assert_eq!(
        output,
        vec![
            "Metaprogram started",
            "Breakpoint \"fib<4>\" added",
            "Breakpoint \"fib<4>\" reached",
            "fib<4> (TemplateInstantiation)",
            "#0 fib<4> (TemplateInstantiation)",
            "#1 fib<5> (TemplateInstantiation)",
            "Breakpoint \"fib<4>\" reached",
            "fib<4> (Memoization)",
            "Metaprogram finished",
            "int_<5>",
        ]
    );
}

#[test]
fn stepping_backward_revisits_earlier_frames() {
    let output = converse(&["evaluate fib<5>", "step 4", "step -2", "step out"]);
    assert_eq!(
        output,
        vec![
            "Metaprogram started",
            "fib<2> (TemplateInstantiation)",
            "fib<3> (TemplateInstantiation)",
            "fib<5> (Memoization)",
        ]
    );
}

#[test]
fn an_errored_program_is_sticky_at_its_end() {
    let output = converse(&["evaluate fail<3>", "continue", "step", "bt"]);
    assert_eq!(
        output,
        vec![
            "Metaprogram started",
            "Metaprogram finished",
            "no member named 'value' in 'fib<0>'",
            "Metaprogram finished",
            "no member named 'value' in 'fib<0>'",
            "Metaprogram finished",
            "no member named 'value' in 'fib<0>'",
        ]
    );
}

#[test]
fn a_session_survives_its_own_mistakes() {
    let output = converse(&[
        "evaluate fib<5>",
        "step banana",
        "frame 0",
        "step 2",
        "frame 0",
    ]);
    assert_eq!(
        output,
        vec![
            "Metaprogram started",
            "Error: Invalid integer: banana",
            "Error: No frame 0",
            "fib<3> (TemplateInstantiation)",
            "#0 fib<3> (TemplateInstantiation)",
        ]
    );
}

#[test]
fn evaluate_replaces_the_live_session_and_its_breakpoints() {
    let mut shell = shell();
    shell.step_line("evaluate fib<5>");
    shell.step_line("rbreak fib");
    shell.step_line("evaluate fib<5>");
    // Fresh session: no breakpoints, run goes to the end.
    assert_eq!(
        shell.step_line("break list"),
        vec!["No breakpoints currently set"]
    );
    assert_eq!(
        shell.step_line("continue"),
        vec!["Metaprogram finished", "int_<5>"]
    );
}

// =============================================================================
// Repeat & History
// =============================================================================

#[test]
fn the_empty_line_repeats_even_a_failing_command() {
    let mut shell = shell();
    shell.step_line("evaluate -nocache fib<5>");
    shell.step_line("step 2");
    let first = shell.step_line("step -1");
    assert_eq!(
        first,
        vec![
            "Error: Caching is disabled in the debugger and stepping backwards requires caching.",
        ]
    );
    assert_eq!(shell.step_line(""), first);
}
