//! The error taxonomy: user-visible texts and fatality classification.

use metatrace_foundation::{Error, ErrorContext, ErrorKind, UnavailableReason};

// =============================================================================
// User-Visible Texts
// =============================================================================

#[test]
fn caching_required_text_is_verbatim() {
    assert_eq!(
        format!("{}", Error::caching_required()),
        "Caching is disabled in the debugger and stepping backwards requires caching."
    );
}

#[test]
fn invalid_integer_names_the_offending_token() {
    assert_eq!(
        format!("{}", Error::invalid_integer("4x")),
        "Invalid integer: 4x"
    );
}

#[test]
fn not_evaluated_text_is_verbatim() {
    assert_eq!(
        format!("{}", Error::not_evaluated()),
        "Metaprogram not evaluated yet"
    );
}

#[test]
fn command_resolution_errors_quote_the_token() {
    let unknown = Error::new(ErrorKind::UnknownCommand("wibble".to_string()));
    assert_eq!(format!("{unknown}"), "Command \"wibble\" is unknown");

    let ambiguous = Error::new(ErrorKind::AmbiguousCommand("s".to_string()));
    assert_eq!(format!("{ambiguous}"), "Command \"s\" is ambiguous");
}

#[test]
fn argument_errors_pass_their_message_through() {
    let err = Error::argument("Usage: frame <N>");
    assert_eq!(format!("{err}"), "Usage: frame <N>");
}

// =============================================================================
// Position Unavailability
// =============================================================================

#[test]
fn unavailable_reasons_are_distinguished_in_the_message() {
    let evicted = Error::position_unavailable(3, UnavailableReason::Evicted);
    assert!(format!("{evicted}").contains("evicted"));

    let unproduced = Error::position_unavailable(3, UnavailableReason::NotProduced);
    assert!(format!("{unproduced}").contains("not produced"));
}

// =============================================================================
// Fatality
// =============================================================================

#[test]
fn only_engine_failures_are_fatal() {
    assert!(Error::engine("connection reset").is_fatal());

    let non_fatal = [
        Error::caching_required(),
        Error::invalid_integer("q"),
        Error::not_evaluated(),
        Error::argument("bad"),
        Error::internal("oops"),
        Error::position_unavailable(0, UnavailableReason::Evicted),
        Error::new(ErrorKind::Io("disk full".to_string())),
        Error::new(ErrorKind::TraceDump("truncated".to_string())),
    ];
    for err in non_fatal {
        assert!(!err.is_fatal(), "{err}");
    }
}

// =============================================================================
// Context
// =============================================================================

#[test]
fn context_carries_command_and_position() {
    let err = Error::position_unavailable(9, UnavailableReason::NotProduced)
        .with_context(ErrorContext::new().with_command("step").with_position(9));
    let context = err.context.expect("context was attached");
    assert_eq!(format!("{context}"), "in command step at position 9");
}
