//! Rules: named, ordered collections of cases.
//!
//! ## Ordering
//!
//! Cases keep registration order and are tried newest first, so a later,
//! more specific registration overrides an earlier catch-all without
//! explicit priorities.
//!
//! ## Merging
//!
//! A new case whose action equals an existing case's action and whose
//! pattern can be unioned into that case's pattern (both entity sets) is
//! folded into the existing case instead of being appended. Anything else
//! is appended, so duplicate wildcard or rule-reference cases coexist.

use std::rc::Rc;

use im::Vector;

use super::case::RuleCase;

/// Handle returned by registration.
///
/// Converts into a rule-reference pattern for later registrations.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RuleHandle {
    name: String,
}

impl RuleHandle {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Name of the rule.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for RuleHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<Rule {}>", self.name)
    }
}

/// Outcome of adding a case to a rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaseInsertion {
    /// Folded into the existing case at this index.
    Merged(usize),
    /// Appended at this index.
    Appended(usize),
}

/// A named rule.
///
/// Cloning is O(1): the case sequence is a persistent vector of shared
/// cases, so a clone is a snapshot that later registrations do not affect
/// (beyond entity-set growth, which is shared).
#[derive(Clone, Debug)]
pub struct Rule {
    name: String,
    cases: Vector<Rc<RuleCase>>,
}

impl Rule {
    /// Create a rule with no cases.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cases: Vector::new(),
        }
    }

    /// Name of the rule.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a case, merging it into an existing one when possible.
    pub fn add_case(&mut self, case: RuleCase) -> CaseInsertion {
        let target = self.cases.iter().position(|existing| {
            existing.action == case.action && existing.pattern.can_merge(&case.pattern)
        });

        if let Some(index) = target {
            self.cases[index].pattern.merge(&case.pattern);
            return CaseInsertion::Merged(index);
        }

        self.cases.push_back(Rc::new(case));
        CaseInsertion::Appended(self.cases.len() - 1)
    }

    /// Cases in registration order.
    pub fn cases(&self) -> impl DoubleEndedIterator<Item = &Rc<RuleCase>> {
        self.cases.iter()
    }

    /// Get a case by registration index.
    #[must_use]
    pub fn case(&self, index: usize) -> Option<&Rc<RuleCase>> {
        self.cases.get(index)
    }

    /// Number of cases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Whether the rule has no cases.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Handle for referencing this rule.
    #[must_use]
    pub fn handle(&self) -> RuleHandle {
        RuleHandle::new(self.name.clone())
    }
}
