//! Metatrace - Interactive debugger for template-metaprogram evaluation
//!
//! This crate re-exports all layers of the Metatrace system for convenient
//! access. For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: metatrace_runtime    — Command shell, trace dumps, CLI
//! Layer 2: metatrace_debug      — Breakpoints, stepping, debugger sessions
//! Layer 1: metatrace_trace      — Engine boundary, trace store, stack projection
//! Layer 0: metatrace_foundation — Core types (Frame, EventKind, Outcome, Error)
//! ```

pub use metatrace_debug as debug;
pub use metatrace_foundation as foundation;
pub use metatrace_runtime as runtime;
pub use metatrace_trace as trace;
