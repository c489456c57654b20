//! Reactive relations.
//!
//! A [`Relation`] is a key-value map that runs a change callback after
//! every write. It is the hook that turns external state changes into
//! rule-driven recomputation, such as re-checking a win condition after
//! each move.

mod reactive;

pub use reactive::{ChangeFn, Relation};
