//! # Counter Demo
//!
//! A simple counter demonstrating the Uniflow state container.
//!
//! This demo showcases:
//! - A closed action enum matched exhaustively by the reducer
//! - A pure reducer returning a new state value per action
//! - Store usage: dispatch, state reads, subscriptions
//! - A logging middleware in front of the reducer
//!
//! ## Example
//!
//! ```
//! use counter::{CounterAction, CounterReducer, CounterState};
//! use uniflow_runtime::Store;
//!
//! let mut store = Store::new(CounterState::default(), CounterReducer);
//!
//! store.dispatch(CounterAction::Increment);
//! assert_eq!(store.state().count, 1);
//! ```

use uniflow_core::reducer::Reducer;

/// Counter state
///
/// The state is just a count. In a real application this would be the whole
/// application state tree; equality between the previous and new value is
/// what drives subscriber notification.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CounterState {
    /// Current count value
    pub count: i64,
}

/// Counter actions
///
/// A closed sum type: the reducer matches it exhaustively, so there is no
/// runtime action-type checking anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CounterAction {
    /// Increment the counter by 1
    Increment,
    /// Decrement the counter by 1
    Decrement,
    /// Reset the counter to 0
    Reset,
}

/// Counter reducer
///
/// Pure function of `(state, action)`. `Reset` on an already-zero counter
/// returns an equal value, so subscribers are not notified for it.
#[derive(Debug, Clone, Copy, Default)]
pub struct CounterReducer;

impl Reducer for CounterReducer {
    type State = CounterState;
    type Action = CounterAction;

    fn reduce(&self, state: &CounterState, action: &CounterAction) -> CounterState {
        match action {
            CounterAction::Increment => CounterState {
                count: state.count + 1,
            },
            CounterAction::Decrement => CounterState {
                count: state.count - 1,
            },
            CounterAction::Reset => CounterState { count: 0 },
        }
    }
}
