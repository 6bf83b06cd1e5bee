//! Core event, frame, and error types for Metatrace.
//!
//! This crate provides:
//! - [`EventKind`] - The closed set of instantiation event kinds
//! - [`Frame`] - One event in an evaluation trace, with its nesting depth
//! - [`SourcePosition`] / [`SourceSpan`] - 1-based locations in metaprogram source
//! - [`Outcome`] - The terminal result of an evaluation
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod event;
pub mod frame;
pub mod outcome;
pub mod source;

pub use error::{Error, ErrorContext, ErrorKind, Result, UnavailableReason};
pub use event::EventKind;
pub use frame::Frame;
pub use outcome::Outcome;
pub use source::{SourcePosition, SourceSpan};
