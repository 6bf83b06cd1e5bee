//! Integration tests for Layer 2: Stepping
//!
//! Drives the stepping engine over synthetic traces: single steps in both
//! directions and both display modes, subtree-scoped movement, free runs
//! with breakpoints, and the universal movement properties.

mod properties;
mod run;
mod single;
