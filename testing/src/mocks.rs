//! Recording doubles for subscribers and middleware
//!
//! These doubles share their logs through `Rc`, so a test keeps one handle
//! for assertions while the store owns the other.

use std::cell::RefCell;
use std::rc::Rc;

use uniflow_core::middleware::{Chain, Middleware};
use uniflow_core::subscription::Subscriber;

/// A subscriber double that records every state it is notified with.
///
/// # Example
///
/// ```
/// use uniflow_core::reducer::reducer_fn;
/// use uniflow_runtime::Store;
/// use uniflow_testing::RecordingSubscriber;
///
/// let mut store = Store::new(0i64, reducer_fn(|s: &i64, a: &i64| s + a));
/// let recorder = RecordingSubscriber::new();
/// store.subscribe([("recorder".into(), recorder.subscriber())]);
///
/// store.dispatch(5);
///
/// // The immediate invoke-on-subscribe plus one change notification.
/// assert_eq!(recorder.states(), vec![0, 5]);
/// ```
#[derive(Debug)]
pub struct RecordingSubscriber<S> {
    seen: Rc<RefCell<Vec<S>>>,
}

impl<S> RecordingSubscriber<S>
where
    S: Clone + 'static,
{
    /// Create a recorder with an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self {
            seen: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Produce the boxed callback to hand to `Store::subscribe`.
    ///
    /// Multiple callbacks from the same recorder append to the same log.
    #[must_use]
    pub fn subscriber(&self) -> Subscriber<S> {
        let seen = Rc::clone(&self.seen);
        Box::new(move |state: &S| seen.borrow_mut().push(state.clone()))
    }

    /// Every state this recorder has been notified with, oldest first.
    ///
    /// Includes the immediate invoke-on-subscribe state.
    #[must_use]
    pub fn states(&self) -> Vec<S> {
        self.seen.borrow().clone()
    }

    /// Number of notifications received so far.
    #[must_use]
    pub fn notification_count(&self) -> usize {
        self.seen.borrow().len()
    }

    /// The most recently notified state, if any.
    #[must_use]
    pub fn last(&self) -> Option<S> {
        self.seen.borrow().last().cloned()
    }
}

impl<S> Default for RecordingSubscriber<S>
where
    S: Clone + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

/// A middleware double that records every action it sees and forwards it
/// unchanged.
///
/// Clones share the same log; box one clone into the store and keep the
/// other for assertions.
#[derive(Debug)]
pub struct RecordingMiddleware<S, A> {
    log: Rc<RefCell<Vec<A>>>,
    _phantom: std::marker::PhantomData<fn(&S)>,
}

impl<S, A> RecordingMiddleware<S, A>
where
    A: Clone,
{
    /// Create a recorder with an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self {
            log: Rc::new(RefCell::new(Vec::new())),
            _phantom: std::marker::PhantomData,
        }
    }

    /// Every action that passed through this middleware, oldest first.
    #[must_use]
    pub fn actions(&self) -> Vec<A> {
        self.log.borrow().clone()
    }
}

impl<S, A> Default for RecordingMiddleware<S, A>
where
    A: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S, A> Clone for RecordingMiddleware<S, A> {
    fn clone(&self) -> Self {
        Self {
            log: Rc::clone(&self.log),
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<S, A> Middleware for RecordingMiddleware<S, A>
where
    A: Clone,
{
    type State = S;
    type Action = A;

    fn run(&self, chain: &mut dyn Chain<State = S, Action = A>, action: A) {
        self.log.borrow_mut().push(action.clone());
        chain.next(action);
    }
}

/// Middleware that swallows every action: it never calls `next`, so the
/// pipeline silently halts at its chain position.
pub struct HaltingMiddleware<S, A> {
    _phantom: std::marker::PhantomData<fn(&S, &A)>,
}

impl<S, A> HaltingMiddleware<S, A> {
    /// Create the halting middleware.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<S, A> Default for HaltingMiddleware<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, A> std::fmt::Debug for HaltingMiddleware<S, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("HaltingMiddleware")
    }
}

impl<S, A> Middleware for HaltingMiddleware<S, A> {
    type State = S;
    type Action = A;

    fn run(&self, _chain: &mut dyn Chain<State = S, Action = A>, _action: A) {}
}
