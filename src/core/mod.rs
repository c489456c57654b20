//! Core types: entities, values, configuration, errors.
//!
//! These are the leaf building blocks shared by the rule engine, the event
//! dispatcher and reactive relations.

pub mod entity;
pub mod value;
pub mod config;
pub mod error;

pub use entity::{EntityAllocator, EntityId};
pub use value::Value;
pub use config::EngineConfig;
pub use error::{Args, EngineError, Result};
