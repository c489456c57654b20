//! The rule engine: registration and resolution.
//!
//! ## Resolution
//!
//! `apply_rule(name, args)` looks up the rule and scans its cases newest
//! first, returning the action result of the first case whose pattern
//! matches. Rule-reference patterns call back into `apply_rule` on the same
//! stack, so the engine is reentrant: every borrow of internal state is
//! released before a pattern is tested or an action is run. Actions and
//! event handlers may therefore query rules, register new cases, or fire
//! events while a resolution is in progress.
//!
//! The engine is single-threaded (`!Send`). Hosts with several threads must
//! confine it to one.
//!
//! ## Cycles
//!
//! A rule whose pattern references itself, directly or transitively,
//! recurses without bound unless [`EngineConfig::max_depth`] is set, in which
//! case the resolution fails with `RecursionLimit`.
//!
//! ```
//! use elysium::core::{EntityAllocator, Value};
//! use elysium::rules::{PatternSpec, RuleEngine};
//!
//! let mut entities = EntityAllocator::new();
//! let monster = entities.alloc();
//! let treasure = entities.alloc();
//!
//! let engine = RuleEngine::new();
//! let treasure_rule = engine.add_rule("Treasure", PatternSpec::Wildcard, false);
//! engine.add_rule("Treasure", treasure, true);
//!
//! engine.add_rule("Price", PatternSpec::Wildcard, 0);
//! engine.add_rule("Price", &treasure_rule, 10);
//!
//! assert_eq!(engine.apply_rule("Price", &[monster]).unwrap(), Value::Int(0));
//! assert_eq!(engine.apply_rule("Price", &[treasure]).unwrap(), Value::Int(10));
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rustc_hash::FxHashMap;
use tracing::{debug, trace, warn};

use crate::core::{EngineConfig, EngineError, EntityId, Result, Value};
use crate::events::EventDispatcher;

use super::action::Action;
use super::case::{CaseDescription, RuleCase};
use super::pattern::{Pattern, PatternSpec};
use super::rule::{Rule, RuleHandle};

/// Registry of rules plus the event dispatcher of one simulation session.
pub struct RuleEngine {
    config: EngineConfig,

    /// Rules in first-registration order.
    rules: RefCell<Vec<Rule>>,

    /// Rule name to position in `rules`.
    index: RefCell<FxHashMap<String, usize>>,

    events: EventDispatcher<RuleEngine>,

    /// Current nesting of `apply_rule`.
    depth: Cell<usize>,
}

/// Restores the resolution depth on every exit path.
struct DepthGuard<'a> {
    depth: &'a Cell<usize>,
}

impl<'a> DepthGuard<'a> {
    fn enter(depth: &'a Cell<usize>) -> Self {
        depth.set(depth.get() + 1);
        Self { depth }
    }
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.depth.set(self.depth.get() - 1);
    }
}

impl RuleEngine {
    /// Create an engine with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine with the given configuration.
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            rules: RefCell::new(Vec::new()),
            index: RefCell::new(FxHashMap::default()),
            events: EventDispatcher::new(),
            depth: Cell::new(0),
        }
    }

    /// Get the engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // === Registration ===

    /// Register a case for the rule `name`.
    ///
    /// Creates the rule on first use. Otherwise the case is merged into an
    /// existing case with an equal action when both patterns are entity
    /// sets, and appended at the end in every other situation.
    pub fn add_rule(
        &self,
        name: impl Into<String>,
        pattern: impl Into<PatternSpec>,
        action: impl Into<Action>,
    ) -> RuleHandle {
        let name = name.into();
        let pattern = Pattern::from_spec(pattern.into());

        let deps: Vec<Rc<RuleCase>> = pattern
            .rule_name()
            .and_then(|target| self.rule(target))
            .map(|rule| rule.cases().cloned().collect())
            .unwrap_or_default();

        let case = RuleCase::new(name.clone(), pattern, action.into()).with_deps(deps);
        debug!(
            rule = %name,
            pattern = %case.pattern,
            action = %case.action,
            "registering rule case"
        );

        let mut rules = self.rules.borrow_mut();
        let mut index = self.index.borrow_mut();
        let slot = *index.entry(name.clone()).or_insert_with(|| {
            rules.push(Rule::new(name.clone()));
            rules.len() - 1
        });
        let insertion = rules[slot].add_case(case);

        trace!(rule = %name, ?insertion, "rule case stored");
        RuleHandle::new(name)
    }

    // === Resolution ===

    /// Apply the rule `name` to `args`.
    ///
    /// Fails with `UnknownRule` if no case was ever registered under `name`
    /// and with `NoMatch` if every pattern rejects `args`. Side effects of
    /// rule-reference tests that ran before a failure are not undone.
    pub fn apply_rule(&self, name: &str, args: &[EntityId]) -> Result<Value> {
        let rule = self.rule(name).ok_or_else(|| EngineError::UnknownRule {
            name: name.to_string(),
        })?;

        let depth = self.depth.get() + 1;
        if !self.config.allows_depth(depth) {
            warn!(rule = name, depth, "recursion limit exceeded");
            return Err(EngineError::RecursionLimit {
                name: name.to_string(),
                depth,
            });
        }
        let _guard = DepthGuard::enter(&self.depth);
        trace!(rule = name, ?args, depth, "applying rule");

        for case in rule.cases().rev() {
            if case.pattern.matches(self, args)? {
                return case.action.run(self, args);
            }
        }

        warn!(rule = name, ?args, "no case matched");
        Err(EngineError::no_match(name, args))
    }

    /// Apply the rule and test the result for truthiness.
    pub fn check(&self, name: &str, args: &[EntityId]) -> Result<bool> {
        Ok(self.apply_rule(name, args)?.is_truthy())
    }

    // === Introspection ===

    /// Snapshot of the rule `name`.
    #[must_use]
    pub fn rule(&self, name: &str) -> Option<Rule> {
        let slot = *self.index.borrow().get(name)?;
        self.rules.borrow().get(slot).cloned()
    }

    /// Check if a rule is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.borrow().contains_key(name)
    }

    /// Rule names in first-registration order.
    #[must_use]
    pub fn rule_names(&self) -> Vec<String> {
        self.rules
            .borrow()
            .iter()
            .map(|rule| rule.name().to_string())
            .collect()
    }

    /// Names of rules referenced by `name`'s patterns, in case order.
    #[must_use]
    pub fn dependencies(&self, name: &str) -> Vec<String> {
        let Some(rule) = self.rule(name) else {
            return Vec::new();
        };

        let mut names: Vec<String> = Vec::new();
        for case in rule.cases() {
            if let Some(target) = case.pattern.rule_name() {
                if !names.iter().any(|n| n == target) {
                    names.push(target.to_string());
                }
            }
        }
        names
    }

    /// Iterate every case of every rule.
    ///
    /// The iterator reads live state on each step, so cases registered
    /// while iterating are visited if they land ahead of the cursor. Call
    /// again to restart.
    pub fn all_rule_cases(&self) -> RuleCases<'_> {
        RuleCases {
            engine: self,
            rule: 0,
            case: 0,
        }
    }

    /// Descriptions of every case, in iteration order.
    #[must_use]
    pub fn describe(&self) -> Vec<CaseDescription> {
        self.all_rule_cases().map(|case| case.describe()).collect()
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.borrow().len()
    }

    /// Check if no rules are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.borrow().is_empty()
    }

    // === Events ===

    /// Register the handler for `event`, replacing any previous one.
    pub fn handle<F>(&self, event: impl Into<String>, handler: F)
    where
        F: Fn(&RuleEngine, &[Value]) -> Result<()> + 'static,
    {
        self.events.handle(event, handler);
    }

    /// Fire `event`. A no-op when nothing handles it.
    pub fn dispatch(&self, event: &str, args: &[Value]) -> Result<()> {
        self.events.dispatch(self, event, args)
    }

    /// Get the event dispatcher.
    #[must_use]
    pub fn events(&self) -> &EventDispatcher<RuleEngine> {
        &self.events
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("config", &self.config)
            .field("rules", &self.rule_names())
            .field("events", &self.events)
            .finish()
    }
}

/// Live iterator over all rule cases. See [`RuleEngine::all_rule_cases`].
pub struct RuleCases<'a> {
    engine: &'a RuleEngine,
    rule: usize,
    case: usize,
}

impl Iterator for RuleCases<'_> {
    type Item = Rc<RuleCase>;

    fn next(&mut self) -> Option<Self::Item> {
        let engine = self.engine;
        let rules = engine.rules.borrow();
        loop {
            let rule = rules.get(self.rule)?;
            if let Some(case) = rule.case(self.case) {
                self.case += 1;
                return Some(Rc::clone(case));
            }
            self.rule += 1;
            self.case = 0;
        }
    }
}
