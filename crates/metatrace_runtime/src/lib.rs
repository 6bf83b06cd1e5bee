//! Command shell, trace dumps, and CLI for Metatrace.
//!
//! This crate provides:
//! - [`Shell`] - The interactive `(mdb)` command loop
//! - [`LineEditor`] / [`RustylineEditor`] - Swappable line editing
//! - [`command`] - The command table and unique-prefix resolution
//! - [`format`] - Plain-text rendering of session display items
//! - [`TraceDump`] - Trace save/load for offline replay

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod command;
pub mod dump;
pub mod editor;
pub mod format;
pub mod shell;

pub use dump::TraceDump;
pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use shell::Shell;
