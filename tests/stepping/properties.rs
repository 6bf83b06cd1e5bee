//! Universal movement properties, checked over random trees.

use metatrace_debug::stepping::{single_step, step_out, step_over};
use metatrace_debug::{Cursor, Landing, StepMode};
use metatrace_trace::{TraceStore, synthetic};
use proptest::prelude::*;

proptest! {
    /// In full mode every position is displayed, so k forward steps land on
    /// position k-1 and k-1 backward steps return to position 0.
    #[test]
    fn forward_then_backward_round_trips(
        seed in any::<u64>(),
        events in 2usize..120,
        k in 2usize..120,
    ) {
        prop_assume!(k <= events);
        let mut store = TraceStore::new(synthetic::random_tree(seed, events));
        let k = k as i64;
        let (there, _) =
            single_step(&mut store, Cursor::BeforeStart, StepMode::Full, k).unwrap();
        prop_assert_eq!(there, Cursor::At(k as usize - 1));
        let (back, _) = single_step(&mut store, there, StepMode::Full, -(k - 1)).unwrap();
        prop_assert_eq!(back, Cursor::At(0));
    }

    /// Step-over never lands strictly inside the subtree it skips.
    #[test]
    fn over_lands_outside_the_subtree(
        seed in any::<u64>(),
        events in 2usize..120,
        start in 1usize..120,
    ) {
        prop_assume!(start <= events);
        let mut store = TraceStore::new(synthetic::random_tree(seed, events));
        let (cursor, _) =
            single_step(&mut store, Cursor::BeforeStart, StepMode::Full, start as i64).unwrap();
        let Cursor::At(position) = cursor else {
            panic!("expected a frame");
        };
        let depth = store.get(position).unwrap().depth;
        let (_, landing) = step_over(&mut store, cursor, StepMode::Full, 1).unwrap();
        match landing {
            Landing::Frame(target) => {
                prop_assert!(target > position);
                prop_assert!(store.get(target).unwrap().depth <= depth);
                // Everything strictly between belongs to the skipped subtree.
                for skipped in (position + 1)..target {
                    prop_assert!(store.get(skipped).unwrap().depth > depth);
                }
            }
            Landing::Terminal => {}
            other => panic!("landed {other:?}"),
        }
    }

    /// Step-out always lands strictly shallower, terminates, or reaches the
    /// beginning when moving backward from a root-level frame.
    #[test]
    fn out_lands_strictly_shallower_in_both_directions(
        seed in any::<u64>(),
        events in 2usize..120,
        start in 1usize..120,
        backward in proptest::bool::ANY,
    ) {
        prop_assume!(start <= events);
        let mut store = TraceStore::new(synthetic::random_tree(seed, events));
        let (cursor, _) =
            single_step(&mut store, Cursor::BeforeStart, StepMode::Full, start as i64).unwrap();
        let Cursor::At(position) = cursor else {
            panic!("expected a frame");
        };
        let depth = store.get(position).unwrap().depth;
        let count = if backward { -1 } else { 1 };
        let (_, landing) = step_out(&mut store, cursor, StepMode::Full, count).unwrap();
        match landing {
            Landing::Frame(target) => {
                prop_assert!(store.get(target).unwrap().depth < depth);
                if backward {
                    prop_assert!(target < position);
                } else {
                    prop_assert!(target > position);
                }
            }
            Landing::Terminal => prop_assert!(!backward),
            Landing::Beginning => prop_assert!(backward),
            Landing::Silent => panic!("silent landing on a nonzero count"),
        }
    }
}
