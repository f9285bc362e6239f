//! Middleware - side-effecting interceptors in front of the reducers
//!
//! A middleware sits between `dispatch` and the reducer pass. Each
//! dispatched action threads through the middleware list in construction
//! order; every middleware may produce side effects, forward the action
//! (transformed or not) with [`Chain::next`], start a brand-new pipeline run
//! with [`Chain::dispatch`], or swallow the action by never calling `next`.
//!
//! Middleware are constructed once, with whatever dependencies they need
//! injected through their own constructors, and are reused across every
//! dispatch for the store's lifetime.
//!
//! # The chain context
//!
//! A middleware receives a single `&mut dyn Chain` context combining the
//! store facade (`state`, `dispatch`) with the continuation (`next`). The
//! continuation is single-use per invocation: the second and later `next`
//! calls from the same middleware invocation are suppressed, so the rest of
//! the chain and the reducers can never run twice for one dispatch.
//!
//! # Asynchronous work
//!
//! The pipeline is synchronous and has no opinion about schedulers. A
//! middleware that needs to wait for something hands the work to its own
//! substrate (thread, channel, runtime handle) and arranges for a fresh
//! `dispatch` on the store later; tracking and cancelling that pending work
//! is the middleware's own responsibility.

use std::borrow::Cow;

/// Pipeline context handed to a middleware for one dispatch.
///
/// Combines the read/dispatch facade on the store with the single-use
/// continuation into the rest of the chain.
pub trait Chain {
    /// The state type of the owning store
    type State;

    /// The action type flowing through the pipeline
    type Action;

    /// Read the store's current state.
    fn state(&self) -> &Self::State;

    /// Re-enter the pipeline from the front with a new action.
    ///
    /// The inner dispatch runs to completion on this same call stack -
    /// middleware chain, reducer pass, and subscriber notification - before
    /// control returns. The caller is still expected to eventually call
    /// [`Chain::next`] exactly once for the action it was given.
    fn dispatch(&mut self, action: Self::Action);

    /// Forward an action to the next middleware, or to the reducers if this
    /// middleware is last in the chain.
    ///
    /// The action may differ from the one this middleware received;
    /// middleware are free to translate or replace actions. At most one
    /// call per middleware invocation takes effect; later calls are
    /// dropped.
    fn next(&mut self, action: Self::Action);
}

/// The Middleware trait - a single interception point per dispatch
///
/// # Example
///
/// ```
/// use uniflow_core::middleware::{Chain, Middleware};
///
/// /// Swallows every action except the ones a predicate admits.
/// struct Filter {
///     admit: fn(&&'static str) -> bool,
/// }
///
/// impl Middleware for Filter {
///     type State = i64;
///     type Action = &'static str;
///
///     fn run(
///         &self,
///         chain: &mut dyn Chain<State = i64, Action = &'static str>,
///         action: &'static str,
///     ) {
///         if (self.admit)(&action) {
///             chain.next(action);
///         }
///         // Dropping the action here silently halts the pipeline for it.
///     }
/// }
/// ```
pub trait Middleware {
    /// The state type of the owning store
    type State;

    /// The action type flowing through the pipeline
    type Action;

    /// Intercept one dispatched action.
    ///
    /// Call `chain.next(action)` to keep the pipeline moving; not calling
    /// it halts the pipeline for this action (no reducer pass, no
    /// notification, no error).
    fn run(
        &self,
        chain: &mut dyn Chain<State = Self::State, Action = Self::Action>,
        action: Self::Action,
    );
}

/// An ordered, boxed middleware list as the store consumes it.
pub type MiddlewareStack<S, A> = Vec<Box<dyn Middleware<State = S, Action = A>>>;

/// Middleware that logs every action passing through it and forwards it
/// unchanged.
///
/// Conventionally installed first in the stack so it sees actions before
/// any other middleware rewrites them.
///
/// # Example
///
/// ```ignore
/// let store = Store::with_middleware(
///     AppState::default(),
///     reducer,
///     vec![Box::new(LoggingMiddleware::new("app"))],
/// );
/// ```
pub struct LoggingMiddleware<S, A> {
    label: Cow<'static, str>,
    _phantom: std::marker::PhantomData<fn(&S, &A)>,
}

impl<S, A> LoggingMiddleware<S, A> {
    /// Create a logging middleware tagged with `label`.
    #[must_use]
    pub fn new(label: impl Into<Cow<'static, str>>) -> Self {
        Self {
            label: label.into(),
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<S, A> Middleware for LoggingMiddleware<S, A>
where
    A: std::fmt::Debug,
{
    type State = S;
    type Action = A;

    fn run(&self, chain: &mut dyn Chain<State = S, Action = A>, action: A) {
        tracing::debug!(label = %self.label, action = ?action, "action dispatched");
        chain.next(action);
    }
}
