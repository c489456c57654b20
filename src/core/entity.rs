//! Entity identification system.
//!
//! Every simulation object (player, monster, rock, board cell marker) is
//! identified by an `EntityId`. The engine never interprets the value; it
//! only compares and hashes it.
//!
//! ## Allocation
//!
//! `EntityAllocator` hands out identifiers in increasing order starting at 0.
//! Identifiers are never reused and carry no generation counter, so stale
//! identifiers are not detected.
//!
//! ```
//! use elysium::core::{EntityAllocator, EntityId};
//!
//! let mut entities = EntityAllocator::new();
//! let player = entities.alloc();
//! let monster = entities.alloc();
//!
//! assert_eq!(player, EntityId(0));
//! assert_eq!(monster, EntityId(1));
//! assert_eq!(entities.issued(), 2);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a simulation entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Monotonic entity allocator.
///
/// Owned by the session that creates entities, so each test or simulation
/// gets its own deterministic sequence.
#[derive(Clone, Debug, Default)]
pub struct EntityAllocator {
    next_id: u32,
}

impl EntityAllocator {
    /// Create an allocator whose first identifier is `EntityId(0)`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh identifier.
    ///
    /// # Panics
    ///
    /// Panics once `u32::MAX` identifiers have been issued. Identifiers are
    /// never reused, so the allocator cannot wrap around.
    pub fn alloc(&mut self) -> EntityId {
        match self.try_alloc() {
            Some(id) => id,
            None => panic!("entity identifiers exhausted after {} allocations", self.next_id),
        }
    }

    /// Allocate a fresh identifier, or `None` when the space is exhausted.
    pub fn try_alloc(&mut self) -> Option<EntityId> {
        let id = EntityId(self.next_id);
        self.next_id = self.next_id.checked_add(1)?;
        Some(id)
    }

    /// Number of identifiers issued so far.
    #[must_use]
    pub fn issued(&self) -> u32 {
        self.next_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_is_sequential() {
        let mut entities = EntityAllocator::new();

        assert_eq!(entities.alloc(), EntityId(0));
        assert_eq!(entities.alloc(), EntityId(1));
        assert_eq!(entities.alloc(), EntityId(2));
        assert_eq!(entities.issued(), 3);
    }

    #[test]
    fn test_allocators_are_independent() {
        let mut a = EntityAllocator::new();
        let mut b = EntityAllocator::new();

        a.alloc();
        a.alloc();

        assert_eq!(b.alloc(), EntityId(0));
        assert_eq!(a.alloc(), EntityId(2));
    }

    #[test]
    fn test_exhausted_allocator_never_wraps() {
        let mut entities = EntityAllocator {
            next_id: u32::MAX - 1,
        };

        assert_eq!(entities.try_alloc(), Some(EntityId(u32::MAX - 1)));
        assert_eq!(entities.try_alloc(), None);
        assert_eq!(entities.try_alloc(), None);
        assert_eq!(entities.issued(), u32::MAX);
    }

    #[test]
    #[should_panic(expected = "entity identifiers exhausted")]
    fn test_alloc_panics_when_exhausted() {
        let mut entities = EntityAllocator { next_id: u32::MAX };
        entities.alloc();
    }

    #[test]
    fn test_ordering() {
        assert!(EntityId(1) < EntityId(2));
        assert_eq!(EntityId::from(7).raw(), 7);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", EntityId(42)), "Entity(42)");
    }

    #[test]
    fn test_serialization() {
        let id = EntityId(123);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: EntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
