//! Hash-backed unordered map.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::map::{Entry, EntryStorage};

/// An associative container with O(1) average operations and unspecified
/// iteration order.
///
/// The full dictionary contract comes from [`MapApi`](crate::map::MapApi).
/// Iteration order is not guaranteed stable across mutations, but a `keys()`
/// / `values()` call pair with no mutation in between yields pairs that line
/// up index-for-index.
///
/// # Examples
///
/// ```rust
/// use entrymap::prelude::*;
///
/// let mut map = UnorderedMap::new();
/// map.insert("a", 1);
/// map.insert("b", 2);
///
/// assert_eq!(map.len(), 2);
/// assert_eq!(map.get(&"a"), Some(&1));
/// assert_eq!(map.pop(&"a")?, 1);
/// assert!(map.pop(&"a").is_err());
/// # Ok::<(), entrymap::MapError>(())
/// ```
#[derive(Debug, Clone)]
pub struct UnorderedMap<K, V> {
    entries: FxHashMap<K, V>,
}

impl<K, V> Default for UnorderedMap<K, V> {
    fn default() -> Self {
        UnorderedMap {
            entries: FxHashMap::default(),
        }
    }
}

impl<K: Eq + Hash, V> UnorderedMap<K, V> {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map from a sequence of pairs.
    ///
    /// On duplicate keys the last value wins.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = Self::new();
        for (key, value) in pairs {
            map.entries.insert(key, value);
        }
        map
    }
}

impl<K: Eq + Hash, V> EntryStorage<K, V> for UnorderedMap<K, V> {
    fn lookup(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    fn store(&mut self, entry: Entry<K, V>) {
        let (key, value) = entry.into_pair();
        self.entries.insert(key, value);
    }

    fn discard(&mut self, key: &K) -> Option<Entry<K, V>> {
        self.entries
            .remove_entry(key)
            .map(|(key, value)| Entry::new(key, value))
    }

    fn entry_count(&self) -> usize {
        self.entries.len()
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_> {
        Box::new(self.entries.iter())
    }
}

impl<K: Eq + Hash, V> FromIterator<(K, V)> for UnorderedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}
