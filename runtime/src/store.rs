//! The Store - state ownership and the dispatch pipeline
//!
//! One store owns one state tree. Conventionally an application builds
//! exactly one store and passes it (or handles to it) where needed; nothing
//! here enforces that, it is a documented contract.
//!
//! A dispatched action flows through the middleware list in construction
//! order. Each middleware may forward the action (possibly replaced) with
//! `next`, start an independent pipeline run with `dispatch`, or drop the
//! action by never continuing. The action that survives the chain is folded
//! through the reducer; when the folded value differs from the previous
//! state by `PartialEq`, every subscriber is notified once with the new
//! state.

use smallvec::{SmallVec, smallvec};
use uniflow_core::middleware::{Chain, Middleware, MiddlewareStack};
use uniflow_core::reducer::Reducer;
use uniflow_core::subscription::{Subscriber, SubscriberKey, SubscriberRegistry, Subscription};

/// The mutable half of the store: the state value and the subscriber map.
///
/// Split out so the dispatch pipeline can borrow it mutably while the
/// reducer and middleware list stay shared.
struct StoreInner<S> {
    state: S,
    subscribers: SubscriberRegistry<S>,
}

/// The Store - a single-writer, observable state container
///
/// The Store manages:
/// 1. State (one value, replaced on every state-changing dispatch)
/// 2. Reducer (pure state transitions)
/// 3. Middleware (ordered interceptors, fixed for the store's lifetime)
/// 4. Subscribers (change-notification callbacks keyed by opaque keys)
///
/// # Type Parameters
///
/// - `S`: state type (`PartialEq` drives change detection)
/// - `A`: action type
/// - `R`: reducer implementation
///
/// # Example
///
/// ```
/// use uniflow_core::reducer::reducer_fn;
/// use uniflow_runtime::Store;
///
/// #[derive(Clone, Debug, PartialEq, Default)]
/// struct CounterState {
///     count: i64,
/// }
///
/// #[derive(Clone, Debug)]
/// enum CounterAction {
///     Increment,
/// }
///
/// let reducer = reducer_fn(|state: &CounterState, action: &CounterAction| match action {
///     CounterAction::Increment => CounterState { count: state.count + 1 },
/// });
///
/// let mut store = Store::new(CounterState::default(), reducer);
/// store.dispatch(CounterAction::Increment);
/// assert_eq!(store.state().count, 1);
/// ```
pub struct Store<S, A, R>
where
    R: Reducer<State = S, Action = A>,
{
    inner: StoreInner<S>,
    reducer: R,
    middleware: MiddlewareStack<S, A>,
}

impl<S, A, R> Store<S, A, R>
where
    S: PartialEq,
    R: Reducer<State = S, Action = A>,
{
    /// Create a store with no middleware.
    ///
    /// # Arguments
    ///
    /// - `initial_state`: the starting state value
    /// - `reducer`: the reducer (compose several with
    ///   [`uniflow_core::composition::combine_reducers`])
    #[must_use]
    pub fn new(initial_state: S, reducer: R) -> Self {
        Self::with_middleware(initial_state, reducer, Vec::new())
    }

    /// Create a store with an ordered middleware list.
    ///
    /// The list order is significant and immutable for the store's
    /// lifetime: every dispatched action visits `middleware[0]` first.
    #[must_use]
    pub fn with_middleware(initial_state: S, reducer: R, middleware: MiddlewareStack<S, A>) -> Self {
        Self {
            inner: StoreInner {
                state: initial_state,
                subscribers: SubscriberRegistry::new(),
            },
            reducer,
            middleware,
        }
    }

    /// Read the current state.
    ///
    /// O(1), no side effects.
    #[must_use]
    pub const fn state(&self) -> &S {
        &self.inner.state
    }

    /// Dispatch an action through the pipeline.
    ///
    /// Runs synchronously to completion: the middleware chain, the reducer
    /// pass, and (when the state value changed) subscriber notification all
    /// happen before this returns. A middleware that never calls `next`
    /// silently halts the pipeline for this action.
    ///
    /// There is no return value; observe the outcome via [`Store::state`]
    /// or a subscription.
    ///
    /// # Panics
    ///
    /// Reducer, middleware, and subscriber panics are not caught; they
    /// propagate to the caller. A failing reducer is a programming error,
    /// not a runtime condition.
    #[tracing::instrument(skip_all, name = "store_dispatch")]
    pub fn dispatch(&mut self, action: A) {
        run_pipeline(&mut self.inner, &self.reducer, &self.middleware, action);
    }

    /// Register a batch of subscribers and return a [`Subscription`] scoped
    /// to exactly the keys in this batch.
    ///
    /// Each callback is invoked once, synchronously, with the current state
    /// before this returns, so late subscribers initialize without a
    /// separate read. Registering under an existing key overwrites the
    /// previous callback.
    ///
    /// # Example
    ///
    /// ```
    /// # use uniflow_core::reducer::reducer_fn;
    /// # use uniflow_core::subscription::Subscriber;
    /// # use uniflow_runtime::Store;
    /// # let mut store = Store::new(0i64, reducer_fn(|s: &i64, _a: &()| *s));
    /// let subscription = store.subscribe([(
    ///     "view".into(),
    ///     Box::new(|state: &i64| println!("state is now {state}")) as Subscriber<i64>,
    /// )]);
    /// store.unsubscribe(&subscription);
    /// ```
    pub fn subscribe<I>(&mut self, batch: I) -> Subscription
    where
        I: IntoIterator<Item = (SubscriberKey, Subscriber<S>)>,
    {
        let mut keys: SmallVec<[SubscriberKey; 4]> = SmallVec::new();

        for (key, mut subscriber) in batch {
            subscriber(&self.inner.state);
            self.inner.subscribers.insert(key.clone(), subscriber);
            keys.push(key);
        }

        Subscription::new(keys)
    }

    /// Register a single subscriber under `key`.
    ///
    /// Convenience over [`Store::subscribe`] for the common one-callback
    /// case.
    pub fn subscribe_with<K, F>(&mut self, key: K, subscriber: F) -> Subscription
    where
        K: Into<SubscriberKey>,
        F: FnMut(&S) + 'static,
    {
        self.subscribe([(key.into(), Box::new(subscriber) as Subscriber<S>)])
    }

    /// Remove exactly the keys the given subscription registered.
    ///
    /// Unsubscribing twice with the same handle, or a handle whose keys
    /// were since overwritten and removed elsewhere, is a no-op.
    pub fn unsubscribe(&mut self, subscription: &Subscription) {
        for key in subscription.keys() {
            self.inner.subscribers.remove(key);
        }
    }

    /// Number of currently registered subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.len()
    }
}

impl<S, A, R> std::fmt::Debug for Store<S, A, R>
where
    S: std::fmt::Debug,
    R: Reducer<State = S, Action = A>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.inner.state)
            .field("subscribers", &self.inner.subscribers)
            .field("middleware", &self.middleware.len())
            .finish_non_exhaustive()
    }
}

/// One full pipeline run: middleware chain, reducer pass, notification.
///
/// Re-entrant dispatch lands back here with the same store internals and a
/// fresh set of continuation guards, so nested runs complete before the
/// outer chain resumes.
fn run_pipeline<S, A>(
    inner: &mut StoreInner<S>,
    reducer: &dyn Reducer<State = S, Action = A>,
    middleware: &[Box<dyn Middleware<State = S, Action = A>>],
    action: A,
) where
    S: PartialEq,
{
    metrics::counter!("store.dispatch").increment(1);

    if middleware.is_empty() {
        reduce_and_notify(inner, reducer, &action);
        return;
    }

    let mut cursor = ChainCursor {
        inner,
        reducer,
        middleware,
        continued: smallvec![false; middleware.len()],
        active: SmallVec::new(),
    };
    cursor.invoke(0, action);
}

/// Reducer pass and change detection for the action that survived the chain.
fn reduce_and_notify<S, A>(
    inner: &mut StoreInner<S>,
    reducer: &dyn Reducer<State = S, Action = A>,
    action: &A,
) where
    S: PartialEq,
{
    let next_state = reducer.reduce(&inner.state, action);

    if next_state == inner.state {
        tracing::trace!("state unchanged, subscribers not notified");
        return;
    }

    inner.state = next_state;

    metrics::counter!("store.state_changed").increment(1);
    tracing::trace!(
        subscribers = inner.subscribers.len(),
        "state changed, notifying subscribers"
    );

    let StoreInner { state, subscribers } = inner;
    subscribers.notify_all(state);
}

/// Cursor over the middleware list for a single dispatch.
///
/// Holds the per-dispatch continuation guards (`continued`, keyed by chain
/// position, never by middleware type) and the stack of currently active
/// chain positions, so `next` always knows which middleware invoked it even
/// under nesting.
struct ChainCursor<'a, S, A> {
    inner: &'a mut StoreInner<S>,
    reducer: &'a dyn Reducer<State = S, Action = A>,
    middleware: &'a [Box<dyn Middleware<State = S, Action = A>>],
    continued: SmallVec<[bool; 8]>,
    active: SmallVec<[usize; 8]>,
}

impl<S, A> ChainCursor<'_, S, A>
where
    S: PartialEq,
{
    fn invoke(&mut self, index: usize, action: A) {
        // Copy the slice reference out so the call below does not alias the
        // &mut self borrow.
        let middleware = self.middleware;

        self.active.push(index);
        middleware[index].run(self, action);
        self.active.pop();
    }
}

impl<S, A> Chain for ChainCursor<'_, S, A>
where
    S: PartialEq,
{
    type State = S;
    type Action = A;

    fn state(&self) -> &S {
        &self.inner.state
    }

    fn dispatch(&mut self, action: A) {
        // An independent pipeline run over the same store, completing
        // before control returns to the calling middleware.
        run_pipeline(&mut *self.inner, self.reducer, self.middleware, action);
    }

    fn next(&mut self, action: A) {
        let Some(&caller) = self.active.last() else {
            // Unreachable through the public surface; the cursor is only
            // handed out inside a middleware frame.
            return;
        };

        if self.continued[caller] {
            tracing::debug!(position = caller, "duplicate next call suppressed");
            return;
        }
        self.continued[caller] = true;

        let index = caller + 1;
        if index >= self.middleware.len() {
            reduce_and_notify(self.inner, self.reducer, &action);
        } else {
            self.invoke(index, action);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use uniflow_core::reducer::{FnReducer, reducer_fn};

    #[derive(Clone, Debug, PartialEq, Default)]
    struct TestState {
        count: i64,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Increment,
        Add(i64),
        Noop,
    }

    fn counter_reducer() -> FnReducer<TestState, TestAction, impl Fn(&TestState, &TestAction) -> TestState>
    {
        reducer_fn(|state: &TestState, action: &TestAction| match action {
            TestAction::Increment => TestState {
                count: state.count + 1,
            },
            TestAction::Add(n) => TestState {
                count: state.count + n,
            },
            TestAction::Noop => state.clone(),
        })
    }

    #[test]
    fn dispatch_updates_state() {
        let mut store = Store::new(TestState::default(), counter_reducer());

        store.dispatch(TestAction::Increment);
        store.dispatch(TestAction::Add(4));

        assert_eq!(store.state().count, 5);
    }

    #[test]
    fn noop_dispatch_preserves_state_and_skips_notification() {
        let mut store = Store::new(TestState { count: 3 }, counter_reducer());

        let notified = Rc::new(RefCell::new(0u32));
        let observer = Rc::clone(&notified);
        let _subscription = store.subscribe_with("observer", move |_state: &TestState| {
            *observer.borrow_mut() += 1;
        });

        // Immediate invoke-on-subscribe.
        assert_eq!(*notified.borrow(), 1);

        store.dispatch(TestAction::Noop);

        assert_eq!(store.state().count, 3);
        assert_eq!(*notified.borrow(), 1);
    }

    #[test]
    fn subscriber_sees_post_fold_state_once_per_dispatch() {
        let mut store = Store::new(TestState::default(), counter_reducer());

        let seen = Rc::new(RefCell::new(Vec::new()));
        let observer = Rc::clone(&seen);
        store.subscribe_with("observer", move |state: &TestState| {
            observer.borrow_mut().push(state.count);
        });

        store.dispatch(TestAction::Increment);
        store.dispatch(TestAction::Increment);
        store.dispatch(TestAction::Increment);

        assert_eq!(*seen.borrow(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn unsubscribe_removes_only_that_batch() {
        let mut store = Store::new(TestState::default(), counter_reducer());

        let first = Rc::new(RefCell::new(0u32));
        let second = Rc::new(RefCell::new(0u32));

        let observer = Rc::clone(&first);
        let first_subscription = store.subscribe_with("first", move |_state: &TestState| {
            *observer.borrow_mut() += 1;
        });
        let observer = Rc::clone(&second);
        let _second_subscription = store.subscribe_with("second", move |_state: &TestState| {
            *observer.borrow_mut() += 1;
        });

        store.unsubscribe(&first_subscription);
        // No-op the second time around.
        store.unsubscribe(&first_subscription);

        store.dispatch(TestAction::Increment);

        assert_eq!(*first.borrow(), 1); // only the immediate invoke
        assert_eq!(*second.borrow(), 2);
        assert_eq!(store.subscriber_count(), 1);
    }

    struct HaltingMiddleware;

    impl Middleware for HaltingMiddleware {
        type State = TestState;
        type Action = TestAction;

        fn run(
            &self,
            _chain: &mut dyn Chain<State = TestState, Action = TestAction>,
            _action: TestAction,
        ) {
            // Never calls next: the pipeline silently halts here.
        }
    }

    struct RecordingMiddleware {
        log: Rc<RefCell<Vec<TestAction>>>,
    }

    impl Middleware for RecordingMiddleware {
        type State = TestState;
        type Action = TestAction;

        fn run(
            &self,
            chain: &mut dyn Chain<State = TestState, Action = TestAction>,
            action: TestAction,
        ) {
            self.log.borrow_mut().push(action.clone());
            chain.next(action);
        }
    }

    #[test]
    fn halting_middleware_stops_pipeline_and_later_middleware() {
        let downstream = Rc::new(RefCell::new(Vec::new()));
        let mut store = Store::with_middleware(
            TestState::default(),
            counter_reducer(),
            vec![
                Box::new(HaltingMiddleware),
                Box::new(RecordingMiddleware {
                    log: Rc::clone(&downstream),
                }),
            ],
        );

        store.dispatch(TestAction::Increment);

        assert_eq!(store.state().count, 0);
        assert!(downstream.borrow().is_empty());
    }

    struct DoubleNextMiddleware;

    impl Middleware for DoubleNextMiddleware {
        type State = TestState;
        type Action = TestAction;

        fn run(
            &self,
            chain: &mut dyn Chain<State = TestState, Action = TestAction>,
            action: TestAction,
        ) {
            chain.next(action.clone());
            // The second call must be dropped, not re-run the chain.
            chain.next(action);
        }
    }

    #[test]
    fn duplicate_next_is_suppressed() {
        let mut store = Store::with_middleware(
            TestState::default(),
            counter_reducer(),
            vec![Box::new(DoubleNextMiddleware)],
        );

        store.dispatch(TestAction::Increment);

        assert_eq!(store.state().count, 1);
    }

    struct TranslatingMiddleware;

    impl Middleware for TranslatingMiddleware {
        type State = TestState;
        type Action = TestAction;

        fn run(
            &self,
            chain: &mut dyn Chain<State = TestState, Action = TestAction>,
            action: TestAction,
        ) {
            match action {
                TestAction::Increment => chain.next(TestAction::Add(10)),
                other => chain.next(other),
            }
        }
    }

    #[test]
    fn middleware_may_replace_the_action() {
        let mut store = Store::with_middleware(
            TestState::default(),
            counter_reducer(),
            vec![Box::new(TranslatingMiddleware)],
        );

        store.dispatch(TestAction::Increment);

        assert_eq!(store.state().count, 10);
    }

    /// Dispatches a follow-up action once, re-entrantly, then forwards the
    /// original.
    struct ReentrantMiddleware {
        follow_up: TestAction,
        armed: RefCell<bool>,
    }

    impl Middleware for ReentrantMiddleware {
        type State = TestState;
        type Action = TestAction;

        fn run(
            &self,
            chain: &mut dyn Chain<State = TestState, Action = TestAction>,
            action: TestAction,
        ) {
            if *self.armed.borrow() {
                *self.armed.borrow_mut() = false;
                chain.dispatch(self.follow_up.clone());
            }
            chain.next(action);
        }
    }

    #[test]
    fn reentrant_dispatch_completes_before_outer_chain_continues() {
        let mut store = Store::with_middleware(
            TestState::default(),
            counter_reducer(),
            vec![Box::new(ReentrantMiddleware {
                follow_up: TestAction::Add(100),
                armed: RefCell::new(true),
            })],
        );

        let seen = Rc::new(RefCell::new(Vec::new()));
        let observer = Rc::clone(&seen);
        store.subscribe_with("observer", move |state: &TestState| {
            observer.borrow_mut().push(state.count);
        });

        store.dispatch(TestAction::Increment);

        // Inner run (Add 100) notified first, then the outer increment.
        assert_eq!(*seen.borrow(), vec![0, 100, 101]);
        assert_eq!(store.state().count, 101);
    }

    #[test]
    fn middleware_ordering_is_construction_order() {
        let first = Rc::new(RefCell::new(Vec::new()));
        let second = Rc::new(RefCell::new(Vec::new()));

        let mut store = Store::with_middleware(
            TestState::default(),
            counter_reducer(),
            vec![
                Box::new(RecordingMiddleware {
                    log: Rc::clone(&first),
                }),
                Box::new(TranslatingMiddleware),
                Box::new(RecordingMiddleware {
                    log: Rc::clone(&second),
                }),
            ],
        );

        store.dispatch(TestAction::Increment);

        assert_eq!(*first.borrow(), vec![TestAction::Increment]);
        // The second recorder sits behind the translator.
        assert_eq!(*second.borrow(), vec![TestAction::Add(10)]);
        assert_eq!(store.state().count, 10);
    }
}
