//! Plain-text rendering of session display items.
//!
//! The debug layer returns structured [`DisplayItem`] sequences; this module
//! turns them into the lines the shell prints.

use std::fmt::Write;

use metatrace_debug::DisplayItem;

/// Renders a display-item sequence to output lines.
#[must_use]
pub fn render(items: &[DisplayItem]) -> Vec<String> {
    let mut lines = Vec::new();
    for item in items {
        render_item(item, &mut lines);
    }
    lines
}

fn render_item(item: &DisplayItem, lines: &mut Vec<String>) {
    match item {
        DisplayItem::RawText(text) => lines.push(text.clone()),
        DisplayItem::Frame(frame) => lines.push(frame.to_string()),
        DisplayItem::EvaluatedType(result) => lines.push(result.clone()),
        DisplayItem::EvaluationError(message) => lines.push(message.clone()),
        DisplayItem::Backtrace(stack) => {
            for (index, frame) in stack.iter().enumerate() {
                lines.push(format!("#{index} {frame}"));
            }
        }
        DisplayItem::CallGraph(rows) => {
            for row in rows {
                let mut line = String::new();
                for _ in 0..row.indent {
                    let _ = write!(line, "  ");
                }
                let _ = write!(line, "{}", row.frame);
                lines.push(line);
            }
        }
    }
}
