//! Map abstractions over an entry-based storage seam.
//!
//! This module provides the traits that abstract over the backing structures
//! of the associative containers. [`EntryStorage`] is the small required
//! surface a backing store must implement; [`MapApi`] layers the full
//! dictionary contract on top of it as provided methods, so each backing
//! structure only implements lookup, store, discard, and iteration.

pub mod entry;
pub mod sorted;
pub mod unordered;

mod order_tree;

pub use entry::Entry;
pub use sorted::SortedMap;
pub use unordered::UnorderedMap;

use crate::error::{MapError, Result};

/// Backing-store seam shared by the map implementations.
///
/// A store is a collection of [`Entry`] records with the invariant that no
/// two entries share a key: `store` replaces any entry whose key equals the
/// incoming entry's key. Iteration order is store-specific; hash-backed
/// stores yield entries in an unspecified order while ordered stores yield
/// them in ascending key order.
pub trait EntryStorage<K, V> {
    /// Returns the stored value for `key`, if present.
    fn lookup(&self, key: &K) -> Option<&V>;

    /// Stores `entry`, replacing any existing entry with an equal key.
    fn store(&mut self, entry: Entry<K, V>);

    /// Removes and returns the entry for `key`, if present.
    fn discard(&mut self, key: &K) -> Option<Entry<K, V>>;

    /// Number of stored entries.
    fn entry_count(&self) -> usize;

    /// Iterates over stored entries as `(key, value)` pairs.
    fn entries(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_>;
}

/// The common dictionary contract, provided on top of [`EntryStorage`].
///
/// Every type implementing [`EntryStorage`] gets this API through a blanket
/// implementation. Accessors come in two flavors: `Option`/default-taking
/// variants that never fail (`get`, `get_or`, `pop_or`) and failing variants
/// that report [`MapError::KeyNotFound`] (`at`, `pop`).
pub trait MapApi<K, V>: EntryStorage<K, V> {
    /// Number of entries in the map.
    fn len(&self) -> usize {
        self.entry_count()
    }

    /// Returns `true` if the map holds no entries.
    fn is_empty(&self) -> bool {
        self.entry_count() == 0
    }

    /// Returns the value for `key`, or `None` if absent. No side effect.
    fn get(&self, key: &K) -> Option<&V> {
        self.lookup(key)
    }

    /// Returns the value for `key`, or `default` if absent. No side effect.
    fn get_or<'a>(&'a self, key: &K, default: &'a V) -> &'a V {
        self.lookup(key).unwrap_or(default)
    }

    /// Returns the value for `key`, failing if the key is absent.
    fn at(&self, key: &K) -> Result<&V> {
        self.lookup(key).ok_or(MapError::KeyNotFound)
    }

    /// Returns `true` if `key` is present.
    fn contains_key(&self, key: &K) -> bool {
        self.lookup(key).is_some()
    }

    /// Inserts `(key, value)`, overwriting any existing value for `key`.
    fn insert(&mut self, key: K, value: V) {
        self.store(Entry::new(key, value));
    }

    /// Replaces the value for `key` if present, otherwise inserts the pair.
    ///
    /// Insert-or-update of a single pair, not a bulk merge; observably the
    /// same operation as [`insert`](MapApi::insert).
    fn update(&mut self, key: K, value: V) {
        self.insert(key, value);
    }

    /// Returns the value for `key`, inserting `(key, default)` first if the
    /// key is absent.
    fn setdefault(&mut self, key: K, default: V) -> &V
    where
        K: Clone,
    {
        if self.lookup(&key).is_none() {
            self.store(Entry::new(key.clone(), default));
        }
        match self.lookup(&key) {
            Some(value) => value,
            None => unreachable!("entry stored above"),
        }
    }

    /// Removes `key` and returns its value, failing if the key is absent.
    fn pop(&mut self, key: &K) -> Result<V> {
        self.discard(key)
            .map(Entry::into_value)
            .ok_or(MapError::KeyNotFound)
    }

    /// Removes `key` and returns its value, or `default` if absent.
    fn pop_or(&mut self, key: &K, default: V) -> V {
        self.discard(key).map(Entry::into_value).unwrap_or(default)
    }

    /// Iterates over all keys.
    ///
    /// For a hash-backed map the order is unspecified, but a `keys()` /
    /// `values()` call pair with no intervening mutation pairs up
    /// index-for-index.
    fn keys<'a>(&'a self) -> Box<dyn Iterator<Item = &'a K> + 'a>
    where
        V: 'a,
    {
        Box::new(self.entries().map(|(key, _)| key))
    }

    /// Iterates over all values, in the same relative order as `keys`.
    fn values<'a>(&'a self) -> Box<dyn Iterator<Item = &'a V> + 'a>
    where
        K: 'a,
    {
        Box::new(self.entries().map(|(_, value)| value))
    }

    /// Iterates over all `(key, value)` pairs.
    fn items(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_> {
        self.entries()
    }
}

impl<K, V, S> MapApi<K, V> for S where S: EntryStorage<K, V> {}
