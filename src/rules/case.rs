//! Rule cases: one (pattern, action) pair within a rule.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::action::{Action, ActionDescription};
use super::pattern::{Pattern, PatternDescription};

/// A single case of a rule.
#[derive(Debug)]
pub struct RuleCase {
    /// Name of the owning rule.
    pub rule_name: String,

    /// Which argument tuples this case applies to.
    pub pattern: Pattern,

    /// What the case produces when it matches.
    pub action: Action,

    /// Cases of the referenced rule when the pattern is a rule reference,
    /// captured at registration time. Introspection only.
    pub deps: Vec<Rc<RuleCase>>,
}

impl RuleCase {
    /// Create a case with no recorded dependencies.
    pub fn new(rule_name: impl Into<String>, pattern: Pattern, action: Action) -> Self {
        Self {
            rule_name: rule_name.into(),
            pattern,
            action,
            deps: Vec::new(),
        }
    }

    /// Record provenance cases (builder pattern).
    #[must_use]
    pub fn with_deps(mut self, deps: impl IntoIterator<Item = Rc<RuleCase>>) -> Self {
        self.deps.extend(deps);
        self
    }

    /// Serializable description of this case.
    #[must_use]
    pub fn describe(&self) -> CaseDescription {
        CaseDescription {
            rule: self.rule_name.clone(),
            pattern: self.pattern.describe(),
            action: self.action.describe(),
        }
    }
}

impl std::fmt::Display for RuleCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<RuleCase {} as {} if {}>", self.rule_name, self.action, self.pattern)
    }
}

/// Snapshot of a case for inspection and serialization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseDescription {
    pub rule: String,
    pub pattern: PatternDescription,
    pub action: ActionDescription,
}
