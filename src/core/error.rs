//! Error types for the rule engine.
//!
//! Every failure surfaces to the immediate caller; the engine performs no
//! retries and no rollback. Side effects of rule-reference pattern tests that
//! ran before a failure are kept.

use smallvec::SmallVec;
use thiserror::Error;

use super::entity::EntityId;

/// Argument tuple of a failed resolution.
pub type Args = SmallVec<[EntityId; 2]>;

/// Errors raised by the engine, its actions and its relations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Unknown rule: {name}")]
    UnknownRule {
        name: String,
    },

    #[error("No cases matched rule {name} for args {args:?}")]
    NoMatch {
        name: String,
        args: Args,
    },

    #[error("Key not found: {key}")]
    KeyNotFound {
        key: String,
    },

    #[error("Recursion limit exceeded applying rule {name} at depth {depth}")]
    RecursionLimit {
        name: String,
        depth: usize,
    },
}

impl EngineError {
    pub(crate) fn no_match(name: &str, args: &[EntityId]) -> Self {
        Self::NoMatch {
            name: name.to_string(),
            args: SmallVec::from_slice(args),
        }
    }

    pub(crate) fn key_not_found<K: std::fmt::Debug>(key: &K) -> Self {
        Self::KeyNotFound {
            key: format!("{:?}", key),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EngineError>;
