//! Engine configuration.
//!
//! The only tunable today is the resolution depth guard. By default the
//! engine does not limit recursion: a rule whose pattern references itself,
//! directly or through other rules, recurses until the stack is exhausted.
//! Setting `max_depth` turns that into a `RecursionLimit` error instead.

use serde::{Deserialize, Serialize};

/// Configuration for a [`RuleEngine`](crate::rules::RuleEngine).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum nesting of `apply_rule` calls. `None` for unlimited.
    pub max_depth: Option<usize>,
}

impl EngineConfig {
    /// Create the default (unbounded) configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail resolutions nested deeper than `depth`.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Remove the depth limit.
    #[must_use]
    pub fn unbounded(mut self) -> Self {
        self.max_depth = None;
        self
    }

    /// Check whether resolving at `depth` is allowed.
    #[must_use]
    pub fn allows_depth(&self, depth: usize) -> bool {
        self.max_depth.is_none_or(|max| depth <= max)
    }
}
