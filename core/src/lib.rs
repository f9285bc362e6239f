//! # Uniflow Core
//!
//! Core traits and types for the Uniflow state container.
//!
//! This crate provides the pure abstractions behind a single-writer,
//! observable state container: one root state value, changed only by pure
//! reducers in response to dispatched actions, with an ordered middleware
//! chain in front of the reducers and change-notification behind them.
//!
//! ## Core Concepts
//!
//! - **State**: the entire application state at an instant. Opaque to this
//!   crate; the only requirements are `Clone` (so reducers can return an
//!   updated copy) and `PartialEq` (so the store can detect changes).
//! - **Action**: an application-defined value describing an intended state
//!   change, typically an enum with payloads. Actions are created by callers
//!   and never owned by the store.
//! - **Reducer**: a pure function `(State, Action) → State`. Irrelevant
//!   actions must produce an equal state value.
//! - **Middleware**: a stateful interceptor sitting between `dispatch` and
//!   the reducers. It may produce side effects, replace the action, re-enter
//!   the pipeline, or swallow the action entirely.
//! - **Subscriber**: a callback notified with the new state once per
//!   dispatch, only when the state value actually changed.
//!
//! ## Architecture Principles
//!
//! - Unidirectional data flow: `dispatch(action)` → middleware → reducers →
//!   notification.
//! - Pure core: reducers are deterministic and side-effect free; all side
//!   effects live in middleware.
//! - Value-based change detection: subscribers fire on `PartialEq`
//!   inequality between the pre- and post-dispatch state, never on reference
//!   identity.
//! - Single logical thread: the pipeline is synchronous and re-entrant on
//!   the same call stack; no scheduler, no queueing.
//!
//! The store itself lives in the `uniflow-runtime` crate; this crate is the
//! vocabulary it speaks.
//!
//! ## Example
//!
//! ```
//! use uniflow_core::reducer::{Reducer, reducer_fn};
//!
//! #[derive(Clone, Debug, PartialEq, Default)]
//! struct CounterState {
//!     count: i64,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum CounterAction {
//!     Increment,
//! }
//!
//! let reducer = reducer_fn(|state: &CounterState, action: &CounterAction| {
//!     match action {
//!         CounterAction::Increment => CounterState { count: state.count + 1 },
//!     }
//! });
//!
//! let next = reducer.reduce(&CounterState::default(), &CounterAction::Increment);
//! assert_eq!(next.count, 1);
//! ```

pub mod composition;
pub mod middleware;
pub mod reducer;
pub mod subscription;

pub use composition::{CombinedReducer, combine_reducers};
pub use middleware::{Chain, LoggingMiddleware, Middleware, MiddlewareStack};
pub use reducer::{FnReducer, Reducer, reducer_fn};
pub use subscription::{Subscriber, SubscriberKey, SubscriberRegistry, Subscription};

// Re-export smallvec for downstream crates that build key batches.
pub use smallvec::{SmallVec, smallvec};
