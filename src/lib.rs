//! # elysium
//!
//! A small declarative rule-dispatch engine for attaching per-entity
//! behavior in an entity simulation.
//!
//! ## Design Principles
//!
//! 1. **Last Registered, First Tried**: Cases of a rule are scanned newest
//!    first. A later, more specific case overrides an earlier catch-all
//!    without priority numbers.
//!
//! 2. **Rules Compose by Name**: A pattern may reference another rule
//!    ("Price is 10 if Treasure"). References are names looked up at
//!    resolution time, never owning pointers.
//!
//! 3. **Reentrant, Single-Threaded**: Resolution, actions, event handlers
//!    and relation callbacks all run synchronously on the caller's stack
//!    and may call back into the engine.
//!
//! ## Modules
//!
//! - `core`: Entity IDs and allocator, values, configuration, errors
//! - `rules`: Patterns, actions, cases, rules and the `RuleEngine`
//! - `events`: Named-event dispatcher
//! - `relation`: Reactive key-value relations
//!
//! ## Example
//!
//! ```
//! use elysium::{EntityAllocator, PatternSpec, RuleEngine, Value};
//!
//! let mut entities = EntityAllocator::new();
//! let player = entities.alloc();
//! let rock = entities.alloc();
//!
//! let engine = RuleEngine::new();
//! engine.add_rule("Living", PatternSpec::Wildcard, false);
//! engine.add_rule("Living", player, true);
//!
//! assert_eq!(engine.apply_rule("Living", &[player]).unwrap(), Value::Bool(true));
//! assert_eq!(engine.apply_rule("Living", &[rock]).unwrap(), Value::Bool(false));
//! ```

pub mod core;
pub mod rules;
pub mod events;
pub mod relation;

// Re-export commonly used types
pub use crate::core::{
    Args, EngineConfig, EngineError, EntityAllocator, EntityId, Result, Value,
};

pub use crate::rules::{
    Action, ActionDescription, CaseDescription, CaseInsertion, EntitySet, Pattern,
    PatternDescription, PatternSpec, Rule, RuleCase, RuleCases, RuleEngine, RuleHandle,
};

pub use crate::events::EventDispatcher;

pub use crate::relation::Relation;
