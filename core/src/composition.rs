//! Reducer composition utilities
//!
//! This module provides [`combine_reducers`], which folds an ordered list of
//! reducers into a single reducer. The fold is sequential and left-to-right:
//! each reducer receives the output of the one before it, not the original
//! pre-dispatch state, so a later reducer observes the effect of an earlier
//! one within the same dispatch.
//!
//! # Examples
//!
//! ```
//! use uniflow_core::composition::combine_reducers;
//! use uniflow_core::reducer::{Reducer, reducer_fn};
//!
//! #[derive(Clone, Debug, PartialEq, Default)]
//! struct AppState {
//!     count: i64,
//!     parity_even: bool,
//! }
//!
//! #[derive(Clone)]
//! enum AppAction {
//!     Increment,
//! }
//!
//! let counter = reducer_fn(|state: &AppState, action: &AppAction| match action {
//!     AppAction::Increment => AppState { count: state.count + 1, ..state.clone() },
//! });
//!
//! // Reads the count the counter reducer just wrote.
//! let parity = reducer_fn(|state: &AppState, _action: &AppAction| AppState {
//!     parity_even: state.count % 2 == 0,
//!     ..state.clone()
//! });
//!
//! let combined = combine_reducers(vec![Box::new(counter), Box::new(parity)]);
//!
//! let next = combined.reduce(&AppState::default(), &AppAction::Increment);
//! assert_eq!(next.count, 1);
//! assert!(!next.parity_even);
//! ```

use crate::reducer::Reducer;

/// A boxed reducer sharing the combined reducer's state and action types.
pub type BoxedReducer<S, A> = Box<dyn Reducer<State = S, Action = A>>;

/// Combine multiple reducers that operate on the same state and action types.
///
/// The returned reducer folds the list left-to-right, feeding each reducer's
/// output into the next and returning the final value. An empty list yields
/// the identity reducer: the state comes back unchanged (as a clone, equal
/// by value).
///
/// Composition is pure and holds no state of its own; the same combined
/// reducer can serve any number of dispatches and store instances.
#[must_use]
pub fn combine_reducers<S, A>(reducers: Vec<BoxedReducer<S, A>>) -> CombinedReducer<S, A>
where
    S: Clone + 'static,
    A: 'static,
{
    CombinedReducer { reducers }
}

/// A combined reducer that folds multiple reducers in sequence.
///
/// Created by [`combine_reducers`].
pub struct CombinedReducer<S, A>
where
    S: Clone + 'static,
    A: 'static,
{
    reducers: Vec<BoxedReducer<S, A>>,
}

impl<S, A> Reducer for CombinedReducer<S, A>
where
    S: Clone + 'static,
    A: 'static,
{
    type State = S;
    type Action = A;

    fn reduce(&self, state: &S, action: &A) -> S {
        let mut folded = state.clone();

        for reducer in &self.reducers {
            folded = reducer.reduce(&folded, action);
        }

        folded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reducer::reducer_fn;
    use proptest::prelude::*;

    #[derive(Clone, Debug, PartialEq, Default)]
    struct TestState {
        x: i64,
        y: i64,
    }

    #[derive(Clone, Debug)]
    enum TestAction {
        Bump(i64),
        Other,
    }

    fn set_x() -> BoxedReducer<TestState, TestAction> {
        Box::new(reducer_fn(
            |state: &TestState, action: &TestAction| match action {
                TestAction::Bump(n) => TestState {
                    x: state.x + n,
                    ..state.clone()
                },
                TestAction::Other => state.clone(),
            },
        ))
    }

    fn mirror_x_into_y() -> BoxedReducer<TestState, TestAction> {
        Box::new(reducer_fn(|state: &TestState, _action: &TestAction| {
            TestState {
                y: state.x,
                ..state.clone()
            }
        }))
    }

    #[test]
    fn folds_left_to_right() {
        // The mirror reducer must see the x that set_x wrote in this same
        // dispatch, not the pre-dispatch x.
        let combined = combine_reducers(vec![set_x(), mirror_x_into_y()]);

        let next = combined.reduce(&TestState { x: 0, y: 0 }, &TestAction::Bump(5));
        assert_eq!(next.x, 5);
        assert_eq!(next.y, 5);
    }

    #[test]
    fn order_is_significant() {
        let combined = combine_reducers(vec![mirror_x_into_y(), set_x()]);

        let next = combined.reduce(&TestState { x: 0, y: 0 }, &TestAction::Bump(5));
        assert_eq!(next.x, 5);
        // Mirror ran first, so it saw the pre-dispatch x.
        assert_eq!(next.y, 0);
    }

    #[test]
    fn empty_list_is_identity() {
        let combined = combine_reducers::<TestState, TestAction>(vec![]);

        let state = TestState { x: 3, y: 9 };
        assert_eq!(combined.reduce(&state, &TestAction::Other), state);
    }

    #[test]
    fn irrelevant_action_folds_to_equal_state() {
        let combined = combine_reducers(vec![set_x()]);

        let state = TestState { x: 3, y: 9 };
        assert_eq!(combined.reduce(&state, &TestAction::Other), state);
    }

    proptest! {
        #[test]
        fn fold_matches_manual_sequential_application(
            start in -1000i64..1000,
            copies in 0usize..8,
        ) {
            let combined = combine_reducers(
                (0..copies).map(|_| set_x()).collect(),
            );

            let state = TestState { x: start, y: 0 };
            let mut expected = state.clone();
            for _ in 0..copies {
                expected = set_x().reduce(&expected, &TestAction::Bump(1));
            }

            let folded = combined.reduce(&state, &TestAction::Bump(1));
            prop_assert_eq!(folded, expected);
        }
    }
}
