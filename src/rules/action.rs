//! Rule actions: what a matching case produces.
//!
//! An action is either a constant value or a computation over the call
//! arguments. Action equality is the key used to merge cases, so it is
//! value equality for constants and identity (the shared `Rc`) for
//! computations. Cloning a computed action preserves its identity.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::core::{EntityId, Result, Value};

use super::engine::RuleEngine;

/// Signature of a computed action.
pub type ComputeFn = dyn Fn(&RuleEngine, &[EntityId]) -> Result<Value>;

/// The outcome attached to a rule case.
#[derive(Clone)]
pub enum Action {
    /// Return a fixed value, ignoring the arguments.
    Constant(Value),
    /// Run a computation with the engine and the call arguments.
    Computed(Rc<ComputeFn>),
}

impl Action {
    /// Create a computation that only needs the arguments.
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&[EntityId]) -> Value + 'static,
    {
        Self::Computed(Rc::new(move |_: &RuleEngine, args: &[EntityId]| -> Result<Value> {
            Ok(f(args))
        }))
    }

    /// Create a computation that can consult the engine.
    pub fn with_engine<F>(f: F) -> Self
    where
        F: Fn(&RuleEngine, &[EntityId]) -> Result<Value> + 'static,
    {
        Self::Computed(Rc::new(f))
    }

    /// Produce this action's value for the given arguments.
    pub fn run(&self, engine: &RuleEngine, args: &[EntityId]) -> Result<Value> {
        match self {
            Action::Constant(value) => Ok(value.clone()),
            Action::Computed(f) => f(engine, args),
        }
    }

    /// Serializable description of this action.
    #[must_use]
    pub fn describe(&self) -> ActionDescription {
        match self {
            Action::Constant(value) => ActionDescription::Constant(value.clone()),
            Action::Computed(_) => ActionDescription::Computed,
        }
    }
}

impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Action::Constant(a), Action::Constant(b)) => a == b,
            (Action::Computed(a), Action::Computed(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Eq for Action {}

impl std::fmt::Debug for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            Action::Computed(func) => write!(f, "Computed({:p})", Rc::as_ptr(func)),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Constant(value) => write!(f, "{}", value),
            Action::Computed(_) => write!(f, "<computed>"),
        }
    }
}

impl From<Value> for Action {
    fn from(value: Value) -> Self {
        Action::Constant(value)
    }
}

macro_rules! constant_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Action {
                fn from(value: $ty) -> Self {
                    Action::Constant(Value::from(value))
                }
            }
        )*
    };
}

constant_from!(bool, i64, i32, String, &str, EntityId);

/// Snapshot of an action for inspection and serialization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionDescription {
    Constant(Value),
    Computed,
}
