//! Source positions and spans.

use metatrace_foundation::{SourcePosition, SourceSpan};

#[test]
fn positions_are_one_based() {
    assert_eq!(SourcePosition::end_of(""), SourcePosition::new(1, 1));
}

#[test]
fn end_of_tracks_lines_and_columns() {
    let source = "template <int N>\nstruct fib;\n";
    assert_eq!(SourcePosition::end_of(source), SourcePosition::new(3, 1));
    assert_eq!(
        SourcePosition::end_of("struct fib;"),
        SourcePosition::new(1, 12)
    );
}

#[test]
fn all_newline_conventions_count_one_break() {
    for source in ["a\nbc", "a\rbc", "a\r\nbc"] {
        assert_eq!(SourcePosition::end_of(source), SourcePosition::new(2, 3));
    }
}

#[test]
fn span_display_is_start_dash_end() {
    let span = SourceSpan::new(SourcePosition::new(1, 1), SourcePosition::new(1, 36));
    assert_eq!(format!("{span}"), "1:1-1:36");
}

#[test]
fn positions_order_by_line_then_column() {
    let mut positions = vec![
        SourcePosition::new(2, 1),
        SourcePosition::new(1, 9),
        SourcePosition::new(1, 2),
    ];
    positions.sort();
    assert_eq!(
        positions,
        vec![
            SourcePosition::new(1, 2),
            SourcePosition::new(1, 9),
            SourcePosition::new(2, 1),
        ]
    );
}
