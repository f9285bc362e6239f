//! Subscriber registry - keyed change-notification callbacks
//!
//! The registry maps opaque [`SubscriberKey`]s to callbacks. Registration
//! under an existing key overwrites the previous entry; notification walks
//! the map in unspecified order and hands each callback the same state
//! reference. [`Subscription`] records which keys one `subscribe` batch
//! registered, so unsubscribing removes exactly those keys and nothing else.

use std::borrow::Cow;
use std::collections::HashMap;

use smallvec::SmallVec;

/// Opaque identifier for a registered subscriber.
///
/// Keys are application-chosen; registering a second callback under the
/// same key replaces the first.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberKey(Cow<'static, str>);

impl SubscriberKey {
    /// Create a key from any string-like value.
    #[must_use]
    pub fn new(key: impl Into<Cow<'static, str>>) -> Self {
        Self(key.into())
    }

    /// The key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for SubscriberKey {
    fn from(key: &'static str) -> Self {
        Self(Cow::Borrowed(key))
    }
}

impl From<String> for SubscriberKey {
    fn from(key: String) -> Self {
        Self(Cow::Owned(key))
    }
}

impl std::fmt::Display for SubscriberKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A boxed subscriber callback, invoked with the state after each
/// state-changing dispatch.
pub type Subscriber<S> = Box<dyn FnMut(&S)>;

/// Handle returned by a `subscribe` call, scoped to exactly the keys that
/// call registered.
///
/// Pass it back to the store to unsubscribe; a second unsubscribe with the
/// same handle is a no-op, since the keys are already gone.
#[derive(Clone, Debug)]
pub struct Subscription {
    keys: SmallVec<[SubscriberKey; 4]>,
}

impl Subscription {
    /// Create a subscription covering `keys`.
    #[must_use]
    pub fn new(keys: impl IntoIterator<Item = SubscriberKey>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    /// The keys this subscription covers.
    #[must_use]
    pub fn keys(&self) -> &[SubscriberKey] {
        &self.keys
    }
}

/// The mapping from subscriber keys to callbacks.
///
/// The store owns one of these; it is exposed here so hosts embedding a
/// store-like object can reuse the same registration semantics.
pub struct SubscriberRegistry<S> {
    entries: HashMap<SubscriberKey, Subscriber<S>>,
}

impl<S> SubscriberRegistry<S> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register `subscriber` under `key`, overwriting any existing entry.
    pub fn insert(&mut self, key: SubscriberKey, subscriber: Subscriber<S>) {
        self.entries.insert(key, subscriber);
    }

    /// Remove the entry under `key`. Removing an absent key is a no-op.
    ///
    /// Returns whether an entry was removed.
    pub fn remove(&mut self, key: &SubscriberKey) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Invoke every registered callback with `state`.
    ///
    /// Iteration order across subscribers is unspecified.
    ///
    /// # Panics
    ///
    /// Callback failures are not isolated: a panicking callback propagates
    /// and aborts the remaining notifications for this pass.
    pub fn notify_all(&mut self, state: &S) {
        for subscriber in self.entries.values_mut() {
            subscriber(state);
        }
    }

    /// Number of registered subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no subscribers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S> Default for SubscriberRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> std::fmt::Debug for SubscriberRegistry<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriberRegistry")
            .field("len", &self.entries.len())
            .finish_non_exhaustive()
    }
}
