//! Key-value relation with a single change callback.

use std::cell::RefCell;
use std::hash::Hash;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::core::{EngineError, Result};

/// Signature of a change callback.
pub type ChangeFn<K, V> = dyn Fn(&Relation<K, V>) -> Result<()>;

/// A mutable mapping that notifies a callback on every write.
///
/// The callback runs after the write is visible and with no borrow held,
/// so it may read (or write) the relation. It receives the relation by
/// reference instead of capturing it, which avoids an ownership cycle.
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// use elysium::relation::Relation;
///
/// let cells: Relation<(u8, u8), char> = [((0, 0), '.'), ((0, 1), '.')].into_iter().collect();
/// let seen = Rc::new(Cell::new('?'));
///
/// let observer = Rc::clone(&seen);
/// cells.on_change(move |rel| {
///     observer.set(rel.get(&(0, 0))?);
///     Ok(())
/// });
///
/// cells.set((0, 0), 'X').unwrap();
/// assert_eq!(seen.get(), 'X');
/// ```
pub struct Relation<K, V> {
    map: RefCell<FxHashMap<K, V>>,
    on_change: RefCell<Option<Rc<ChangeFn<K, V>>>>,
}

impl<K, V> Relation<K, V>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
    V: Clone,
{
    /// Create an empty relation.
    #[must_use]
    pub fn new() -> Self {
        Self {
            map: RefCell::new(FxHashMap::default()),
            on_change: RefCell::new(None),
        }
    }

    /// Read the value for `key`.
    pub fn get(&self, key: &K) -> Result<V> {
        self.map
            .borrow()
            .get(key)
            .cloned()
            .ok_or_else(|| EngineError::key_not_found(key))
    }

    /// Write `value` for `key`, then run the change callback.
    ///
    /// Returns the callback's result.
    pub fn set(&self, key: K, value: V) -> Result<()> {
        trace!(key = ?key, "relation write");
        self.map.borrow_mut().insert(key, value);

        let callback = self.on_change.borrow().clone();
        match callback {
            Some(callback) => callback(self),
            None => Ok(()),
        }
    }

    /// Register the change callback, replacing any previous one.
    pub fn on_change<F>(&self, callback: F)
    where
        F: Fn(&Relation<K, V>) -> Result<()> + 'static,
    {
        *self.on_change.borrow_mut() = Some(Rc::new(callback));
    }

    /// Check if `key` has a value.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.map.borrow().contains_key(key)
    }

    /// Snapshot of all pairs.
    #[must_use]
    pub fn entries(&self) -> Vec<(K, V)> {
        self.map
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.borrow().len()
    }

    /// Check if the relation is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.borrow().is_empty()
    }
}

impl<K, V> Default for Relation<K, V>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> FromIterator<(K, V)> for Relation<K, V>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
    V: Clone,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            map: RefCell::new(iter.into_iter().collect()),
            on_change: RefCell::new(None),
        }
    }
}

impl<K: std::fmt::Debug, V: std::fmt::Debug> std::fmt::Debug for Relation<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Relation")
            .field("map", &self.map.borrow())
            .field("on_change", &self.on_change.borrow().is_some())
            .finish()
    }
}
