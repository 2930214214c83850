//! Synchronous publish/subscribe dispatch keyed by [`EventKind`].
//!
//! The bus owns no state of its own beyond the handler table. Emitting an
//! event lends the caller's state to each subscribed handler in turn, and a
//! handler that emits a follow-up event through the bus reference it receives
//! sees that follow-up fully dispatched before it regains control. A chain
//! such as attack → damage therefore resolves depth-first inside a single
//! `emit` call.

use std::fmt;

use crate::{Event, EventKind};

/// Callback invoked for every emitted event of the kind it subscribed to.
pub type Handler<S> = Box<dyn Fn(&mut S, &Event, &EventBus<S>)>;

/// Routes events to the handlers subscribed to their kind.
pub struct EventBus<S> {
    handlers: [Vec<Handler<S>>; EventKind::COUNT],
}

impl<S> EventBus<S> {
    /// Creates a bus with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: std::array::from_fn(|_| Vec::new()),
        }
    }

    /// Registers a handler for every future event of `kind`.
    ///
    /// Handlers of the same kind run in registration order. Subscriptions last
    /// for the lifetime of the bus.
    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F)
    where
        F: Fn(&mut S, &Event, &Self) + 'static,
    {
        self.handlers[kind.index()].push(Box::new(handler));
    }

    /// Dispatches the event to its subscribers and returns once all of them have.
    pub fn emit(&self, state: &mut S, event: &Event) {
        for handler in &self.handlers[event.kind().index()] {
            handler(state, event, self);
        }
    }

    /// Number of handlers subscribed to `kind`.
    #[must_use]
    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.handlers[kind.index()].len()
    }
}

impl<S> Default for EventBus<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for EventBus<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for kind in EventKind::ALL {
            let _ = map.entry(&kind, &self.subscriber_count(kind));
        }
        map.finish()
    }
}
