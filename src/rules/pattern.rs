//! Patterns select which argument tuples a rule case applies to.
//!
//! ## Pattern Forms
//!
//! - `Wildcard`: matches every tuple
//! - `Entities`: matches when the first argument is a member of the set
//! - `Rule`: matches when applying the named rule to the same tuple yields a
//!   truthy value
//!
//! A pattern's form is fixed at construction. Only the member set of an
//! `Entities` pattern may change afterwards, and only by growing through
//! [`Pattern::merge`].
//!
//! Rule-reference patterns hold the referenced rule's *name*, never the rule
//! itself, so rules that reference each other do not own each other.
//! Testing such a pattern runs the referenced rule's action, including any
//! side effects it has.

use std::cell::RefCell;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::{EntityId, Result};

use super::engine::RuleEngine;
use super::rule::RuleHandle;

/// Pattern specification supplied at registration time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PatternSpec {
    /// Match anything.
    Wildcard,
    /// Match these entities.
    Entities(Vec<EntityId>),
    /// Match when the named rule holds.
    Rule(String),
}

impl PatternSpec {
    /// Reference another rule by name.
    pub fn rule(name: impl Into<String>) -> Self {
        Self::Rule(name.into())
    }

    /// Match a set of entities.
    pub fn entities(entities: impl IntoIterator<Item = EntityId>) -> Self {
        Self::Entities(entities.into_iter().collect())
    }
}

impl From<EntityId> for PatternSpec {
    fn from(entity: EntityId) -> Self {
        Self::Entities(vec![entity])
    }
}

impl From<RuleHandle> for PatternSpec {
    fn from(handle: RuleHandle) -> Self {
        Self::Rule(handle.name().to_string())
    }
}

impl From<&RuleHandle> for PatternSpec {
    fn from(handle: &RuleHandle) -> Self {
        Self::Rule(handle.name().to_string())
    }
}

/// Member set of an entity-set pattern.
///
/// Readable only through copies and writable only by [`Pattern::merge`], so
/// a set never shrinks and no borrow of it outlives a single call.
#[derive(Debug, Default)]
pub struct EntitySet(RefCell<FxHashSet<EntityId>>);

impl EntitySet {
    fn contains(&self, entity: &EntityId) -> bool {
        self.0.borrow().contains(entity)
    }

    fn absorb(&self, other: &EntitySet) {
        if std::ptr::eq(self, other) {
            return;
        }
        let incoming: Vec<EntityId> = other.0.borrow().iter().copied().collect();
        self.0.borrow_mut().extend(incoming);
    }

    /// Members in ascending order.
    #[must_use]
    pub fn sorted(&self) -> Vec<EntityId> {
        let mut sorted: Vec<EntityId> = self.0.borrow().iter().copied().collect();
        sorted.sort_unstable();
        sorted
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

impl FromIterator<EntityId> for EntitySet {
    fn from_iter<I: IntoIterator<Item = EntityId>>(iter: I) -> Self {
        Self(RefCell::new(iter.into_iter().collect()))
    }
}

/// A live pattern owned by a rule case.
#[derive(Debug)]
pub enum Pattern {
    /// Matches every argument tuple.
    Wildcard,
    /// Matches when the first argument is a member.
    Entities(EntitySet),
    /// Matches when the named rule returns a truthy value.
    Rule(String),
}

impl Pattern {
    /// Build a pattern from its specification.
    pub fn from_spec(spec: PatternSpec) -> Self {
        match spec {
            PatternSpec::Wildcard => Pattern::Wildcard,
            PatternSpec::Entities(entities) => {
                Pattern::Entities(entities.into_iter().collect())
            }
            PatternSpec::Rule(name) => Pattern::Rule(name),
        }
    }

    /// Test this pattern against an argument tuple.
    ///
    /// Rule references are resolved through `engine`, which may recurse.
    pub fn matches(&self, engine: &RuleEngine, args: &[EntityId]) -> Result<bool> {
        match self {
            Pattern::Wildcard => Ok(true),
            Pattern::Entities(members) => Ok(args
                .first()
                .is_some_and(|arg| members.contains(arg))),
            Pattern::Rule(name) => Ok(engine.apply_rule(name, args)?.is_truthy()),
        }
    }

    /// Whether this pattern can absorb `other` by union.
    #[must_use]
    pub fn can_merge(&self, other: &Pattern) -> bool {
        matches!((self, other), (Pattern::Entities(_), Pattern::Entities(_)))
    }

    /// Union `other`'s members into this pattern.
    ///
    /// Only entity sets merge. Returns `false` and leaves both patterns
    /// untouched for any other combination.
    pub fn merge(&self, other: &Pattern) -> bool {
        match (self, other) {
            (Pattern::Entities(mine), Pattern::Entities(theirs)) => {
                mine.absorb(theirs);
                true
            }
            _ => false,
        }
    }

    /// Sorted members, if this is an entity set.
    #[must_use]
    pub fn members(&self) -> Option<Vec<EntityId>> {
        match self {
            Pattern::Entities(members) => Some(members.sorted()),
            _ => None,
        }
    }

    /// Name of the referenced rule, if this is a rule reference.
    #[must_use]
    pub fn rule_name(&self) -> Option<&str> {
        match self {
            Pattern::Rule(name) => Some(name),
            _ => None,
        }
    }

    /// Serializable description of this pattern.
    #[must_use]
    pub fn describe(&self) -> PatternDescription {
        match self {
            Pattern::Wildcard => PatternDescription::Wildcard,
            Pattern::Entities(_) => PatternDescription::Entities(self.members().unwrap_or_default()),
            Pattern::Rule(name) => PatternDescription::Rule(name.clone()),
        }
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pattern::Wildcard => write!(f, "_"),
            Pattern::Entities(_) => {
                let members = self.members().unwrap_or_default();
                write!(f, "{{")?;
                for (i, entity) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", entity)?;
                }
                write!(f, "}}")
            }
            Pattern::Rule(name) => write!(f, "{}", name),
        }
    }
}

/// Snapshot of a pattern for inspection and serialization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatternDescription {
    Wildcard,
    Entities(Vec<EntityId>),
    Rule(String),
}
