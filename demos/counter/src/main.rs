//! Counter demo binary
//!
//! Wires a store with a logging middleware and a printing subscriber, then
//! dispatches a handful of actions.

use counter::{CounterAction, CounterReducer, CounterState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uniflow_core::middleware::LoggingMiddleware;
use uniflow_runtime::Store;

fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "counter=debug,uniflow_core=debug,uniflow_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Counter Demo: Uniflow State Container ===\n");

    let mut store = Store::with_middleware(
        CounterState::default(),
        CounterReducer,
        vec![Box::new(LoggingMiddleware::new("counter"))],
    );

    // Fires immediately with the current state, then once per change.
    let subscription = store.subscribe_with("printer", |state: &CounterState| {
        println!("count is now {}", state.count);
    });

    for action in [
        CounterAction::Increment,
        CounterAction::Increment,
        CounterAction::Increment,
        CounterAction::Decrement,
        CounterAction::Reset,
        // A second Reset folds to an equal state: no notification below.
        CounterAction::Reset,
    ] {
        println!(">>> dispatching {action:?}");
        store.dispatch(action);
    }

    store.unsubscribe(&subscription);
    store.dispatch(CounterAction::Increment);

    println!("\nfinal count (read directly): {}", store.state().count);
}
