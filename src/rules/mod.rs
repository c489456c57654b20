//! Declarative rule dispatch.
//!
//! Callers register named rules made of (pattern, action) cases and later
//! apply a rule to an entity tuple. The newest matching case decides the
//! result.
//!
//! ## Key Components
//!
//! - [`Pattern`]: which argument tuples a case applies to
//! - [`Action`]: constant value or computation
//! - [`RuleCase`]: one (pattern, action) pair
//! - [`Rule`]: ordered cases under one name, with case merging
//! - [`RuleEngine`]: rule registry, resolution and event dispatch

mod action;
mod case;
mod engine;
mod pattern;
mod rule;

pub use action::{Action, ActionDescription, ComputeFn};
pub use case::{CaseDescription, RuleCase};
pub use engine::{RuleCases, RuleEngine};
pub use pattern::{EntitySet, Pattern, PatternDescription, PatternSpec};
pub use rule::{CaseInsertion, Rule, RuleHandle};
