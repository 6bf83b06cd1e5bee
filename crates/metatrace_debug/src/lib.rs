//! Breakpoints, stepping algorithms, and debugger sessions for Metatrace.
//!
//! This crate provides:
//! - [`StepMode`] / [`SessionConfig`] - Fixed per-session settings
//! - [`Breakpoint`] / [`BreakpointSet`] - Regex breakpoints over frame names
//! - [`stepping`] - The position cursor and the stepping algorithms
//! - [`DebugSession`] - The externally visible debugger state machine
//! - [`DisplayItem`] - Display-ready command results

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod breakpoint;
pub mod config;
pub mod output;
pub mod session;
pub mod stepping;

pub use breakpoint::{Breakpoint, BreakpointSet};
pub use config::{SessionConfig, StepMode};
pub use output::{CallGraphNode, DisplayItem};
pub use session::DebugSession;
pub use stepping::{Cursor, Landing, Stop};
