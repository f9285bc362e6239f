//! # Uniflow Testing
//!
//! Testing utilities and helpers for the Uniflow state container.
//!
//! This crate provides:
//! - Recording doubles for subscribers and middleware
//! - A fluent Given-When-Then harness for whole-store scenarios
//!
//! ## Example
//!
//! ```
//! use uniflow_core::reducer::reducer_fn;
//! use uniflow_testing::StoreTest;
//!
//! let reducer = reducer_fn(|state: &i64, action: &i64| state + action);
//!
//! StoreTest::new(reducer)
//!     .given_state(0i64)
//!     .when_actions([1, 2, 3])
//!     .then_state(|state| assert_eq!(*state, 6))
//!     .then_notifications(|seen| assert_eq!(seen, &[1, 3, 6]))
//!     .run();
//! ```

pub mod mocks;

pub use mocks::{HaltingMiddleware, RecordingMiddleware, RecordingSubscriber};
pub use store_test::StoreTest;
