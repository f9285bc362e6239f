//! # Uniflow Runtime
//!
//! Runtime implementation for the Uniflow state container.
//!
//! This crate provides the [`Store`]: the single owner of the state value,
//! the reducer list, the middleware chain, and the subscriber registry. Its
//! dispatch pipeline threads each action through the middleware in order,
//! folds the reducers over the surviving action, and notifies subscribers
//! exactly once when the state value actually changed.
//!
//! ## Core Components
//!
//! - **Store**: the read/dispatch/subscribe surface
//! - **Dispatch pipeline**: ordered middleware traversal with per-dispatch
//!   continuation guards, then the reducer pass and change detection
//!
//! ## Concurrency model
//!
//! The pipeline is synchronous and single-threaded by contract: `dispatch`
//! does not return until the chain, the reducer pass, and any notifications
//! have completed. Re-entrant dispatch (a middleware calling back into the
//! store) runs to completion on the same call stack; there is no queueing
//! and no cycle detection. `dispatch` takes `&mut self`, so a multi-threaded
//! host serializes access the usual way, for example behind a `Mutex`.
//!
//! ## Example
//!
//! ```
//! use uniflow_core::reducer::reducer_fn;
//! use uniflow_runtime::Store;
//!
//! #[derive(Clone, Debug, PartialEq, Default)]
//! struct AppState {
//!     count: i64,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum AppAction {
//!     Increment,
//! }
//!
//! let reducer = reducer_fn(|state: &AppState, action: &AppAction| match action {
//!     AppAction::Increment => AppState { count: state.count + 1 },
//! });
//!
//! let mut store = Store::new(AppState::default(), reducer);
//! store.dispatch(AppAction::Increment);
//! assert_eq!(store.state().count, 1);
//! ```

pub mod store;

pub use store::Store;
