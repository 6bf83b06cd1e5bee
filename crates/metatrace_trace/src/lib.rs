//! Evaluation engine boundary, trace store, and stack projection for Metatrace.
//!
//! This crate provides:
//! - [`EventSource`] - The pull interface to an evaluation engine
//! - [`Pulse`] - One engine pull result: a frame or the terminal outcome
//! - [`ScriptedSource`] - An engine that replays a prepared pulse sequence
//! - [`TraceStore`] - The append-only trace arena with the caching policy
//! - [`stack_at`] - Projection of the active call stack at a position
//! - [`synthetic`] - Deterministic built-in metaprograms for debugging

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod engine;
pub mod stack;
pub mod store;
pub mod synthetic;

pub use engine::{EventSource, Pulse, ScriptedSource};
pub use stack::stack_at;
pub use store::TraceStore;
