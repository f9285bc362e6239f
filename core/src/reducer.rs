//! The Reducer trait - the only way state changes
//!
//! A reducer is a pure function `(State, Action) → State`. It never mutates
//! its input, never performs side effects, and returns an equal state value
//! when the action does not concern it. The store compares the returned
//! value against the previous one with `PartialEq` to decide whether
//! subscribers should be notified, so "return an equal value" is how a
//! reducer opts out of an action.

/// The Reducer trait - core abstraction for state transitions
///
/// # Type Parameters
///
/// - `State`: the state type this reducer operates on
/// - `Action`: the action type this reducer processes
///
/// # Purity Contract
///
/// `reduce` must be a pure function of its arguments: no I/O, no interior
/// mutation, no dependence on ambient state. Violations are not detected;
/// the observable symptom is spurious or missing subscriber notifications.
///
/// # Example
///
/// ```
/// use uniflow_core::reducer::Reducer;
///
/// #[derive(Clone, PartialEq, Default)]
/// struct TodoState {
///     items: Vec<String>,
/// }
///
/// #[derive(Clone)]
/// enum TodoAction {
///     Add(String),
///     Clear,
/// }
///
/// struct TodoReducer;
///
/// impl Reducer for TodoReducer {
///     type State = TodoState;
///     type Action = TodoAction;
///
///     fn reduce(&self, state: &TodoState, action: &TodoAction) -> TodoState {
///         match action {
///             TodoAction::Add(item) => {
///                 let mut items = state.items.clone();
///                 items.push(item.clone());
///                 TodoState { items }
///             },
///             TodoAction::Clear => TodoState { items: Vec::new() },
///         }
///     }
/// }
/// ```
pub trait Reducer {
    /// The state type this reducer operates on
    type State;

    /// The action type this reducer processes
    type Action;

    /// Produce the next state from the current state and an action
    ///
    /// Returns the new state value. For actions this reducer does not care
    /// about, the returned value must compare equal to `state` (typically
    /// `state.clone()`); structural equality is what matters, not reference
    /// identity.
    fn reduce(&self, state: &Self::State, action: &Self::Action) -> Self::State;
}

/// A reducer backed by a plain function or closure.
///
/// Created by [`reducer_fn`].
pub struct FnReducer<S, A, F>
where
    F: Fn(&S, &A) -> S,
{
    f: F,
    _phantom: std::marker::PhantomData<fn(&S, &A) -> S>,
}

impl<S, A, F> Reducer for FnReducer<S, A, F>
where
    F: Fn(&S, &A) -> S,
{
    type State = S;
    type Action = A;

    fn reduce(&self, state: &S, action: &A) -> S {
        (self.f)(state, action)
    }
}

/// Wrap a closure `Fn(&State, &Action) -> State` as a [`Reducer`].
///
/// This is the lightest way to build a reducer when a dedicated type adds
/// nothing:
///
/// ```
/// use uniflow_core::reducer::{Reducer, reducer_fn};
///
/// let double = reducer_fn(|state: &i64, _action: &()| state * 2);
/// assert_eq!(double.reduce(&21, &()), 42);
/// ```
pub const fn reducer_fn<S, A, F>(f: F) -> FnReducer<S, A, F>
where
    F: Fn(&S, &A) -> S,
{
    FnReducer {
        f,
        _phantom: std::marker::PhantomData,
    }
}
