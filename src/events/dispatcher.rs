//! Named-event dispatcher.
//!
//! One handler per event name; registering again replaces the previous
//! handler. Dispatch is synchronous and reentrant: a handler may dispatch
//! further events (including its own) before returning. Dispatching an
//! event nobody handles does nothing.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::core::{Result, Value};

/// Signature of an event handler receiving a context of type `C`.
pub type Handler<C> = dyn Fn(&C, &[Value]) -> Result<()>;

/// Registry mapping event names to handlers.
pub struct EventDispatcher<C> {
    handlers: RefCell<FxHashMap<String, Rc<Handler<C>>>>,
}

impl<C> EventDispatcher<C> {
    /// Create an empty dispatcher.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(FxHashMap::default()),
        }
    }

    /// Register the handler for `event`, replacing any previous one.
    pub fn handle<F>(&self, event: impl Into<String>, handler: F)
    where
        F: Fn(&C, &[Value]) -> Result<()> + 'static,
    {
        let event = event.into();
        let replaced = self
            .handlers
            .borrow_mut()
            .insert(event.clone(), Rc::new(handler))
            .is_some();
        debug!(event = %event, replaced, "registered event handler");
    }

    /// Invoke the handler for `event` with `args`.
    ///
    /// The handler runs with no borrow of the registry held, so it may
    /// register handlers or dispatch events itself. Returns the handler's
    /// result, or `Ok(())` when no handler is registered.
    pub fn dispatch(&self, ctx: &C, event: &str, args: &[Value]) -> Result<()> {
        let handler = self.handlers.borrow().get(event).cloned();
        match handler {
            Some(handler) => {
                trace!(event, ?args, "dispatching event");
                handler(ctx, args)
            }
            None => {
                debug!(event, "no handler registered");
                Ok(())
            }
        }
    }

    /// Check if `event` has a handler.
    #[must_use]
    pub fn has_handler(&self, event: &str) -> bool {
        self.handlers.borrow().contains_key(event)
    }

    /// Number of events with a handler.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.borrow().len()
    }

    /// Check if no handlers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.borrow().is_empty()
    }
}

impl<C> Default for EventDispatcher<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> std::fmt::Debug for EventDispatcher<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut events: Vec<String> = self.handlers.borrow().keys().cloned().collect();
        events.sort();
        f.debug_struct("EventDispatcher").field("events", &events).finish()
    }
}
