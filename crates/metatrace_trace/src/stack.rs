//! Call-stack projection.
//!
//! The trace records no explicit tree; the active stack at a position is
//! recovered from depth arithmetic. Frame `p` is an ancestor of the frame
//! at `position` if it is the nearest preceding frame shallower than every
//! frame between the two.

use metatrace_foundation::{Frame, Result};

use crate::store::TraceStore;

/// Returns the active call stack at `position`, innermost frame first.
///
/// The projection scans backward from `position`, so every position down to
/// the matching depth-0 ancestor must still be retained; with caching
/// disabled callers must not ask for positions whose ancestry has been
/// evicted. The result always holds exactly `depth + 1` frames, one per
/// depth level.
///
/// # Errors
///
/// Returns a position-unavailable error if `position` or one of its
/// ancestors is evicted or not yet produced.
pub fn stack_at(store: &TraceStore, position: usize) -> Result<Vec<Frame>> {
    let innermost = store.get(position)?.clone();
    let mut shallower = innermost.depth;
    let mut stack = vec![innermost];

    for candidate in (0..position).rev() {
        if shallower == 0 {
            break;
        }
        let frame = store.get(candidate)?;
        if frame.depth < shallower {
            shallower = frame.depth;
            stack.push(frame.clone());
        }
    }

    Ok(stack)
}
