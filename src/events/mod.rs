//! Event dispatch for simulation logic.
//!
//! Games register one handler per named event and fire events by name.
//! The [`RuleEngine`](crate::rules::RuleEngine) owns a dispatcher whose
//! handlers receive the engine itself, so a handler can query rules and
//! fire follow-up events.
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use elysium::core::Value;
//! use elysium::rules::RuleEngine;
//!
//! let engine = RuleEngine::new();
//! let wins = Rc::new(Cell::new(0));
//!
//! let counter = Rc::clone(&wins);
//! engine.handle("Win", move |_engine, _args| {
//!     counter.set(counter.get() + 1);
//!     Ok(())
//! });
//!
//! engine.dispatch("Win", &[Value::from("X")]).unwrap();
//! engine.dispatch("Draw", &[]).unwrap(); // no handler: nothing happens
//! assert_eq!(wins.get(), 1);
//! ```

mod dispatcher;

pub use dispatcher::{EventDispatcher, Handler};
