//! The key-value entry record shared by the map implementations.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// An immutable key-value pair.
///
/// Equality, ordering, and hashing are defined by the key alone: two entries
/// with equal keys compare equal regardless of their values. This is what
/// lets a set-like backing structure enforce one entry per key without
/// inspecting values.
///
/// Entries are owned exclusively by the container holding them; they cross
/// the [`EntryStorage`](crate::map::EntryStorage) seam by value.
///
/// # Examples
///
/// ```rust
/// use entrymap::map::Entry;
///
/// let a = Entry::new("k", 1);
/// let b = Entry::new("k", 2);
/// assert_eq!(a, b); // same key, values ignored
/// ```
#[derive(Debug, Clone)]
pub struct Entry<K, V> {
    key: K,
    value: V,
}

impl<K, V> Entry<K, V> {
    /// Creates an entry from a key and a value.
    pub fn new(key: K, value: V) -> Self {
        Entry { key, value }
    }

    /// The entry's key.
    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The entry's value.
    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Consumes the entry, returning its value.
    #[inline]
    pub fn into_value(self) -> V {
        self.value
    }

    /// Consumes the entry, returning the `(key, value)` pair.
    #[inline]
    pub fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K: PartialEq, V> PartialEq for Entry<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<K: Eq, V> Eq for Entry<K, V> {}

impl<K: PartialOrd, V> PartialOrd for Entry<K, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.key.partial_cmp(&other.key)
    }
}

impl<K: Ord, V> Ord for Entry<K, V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl<K: Hash, V> Hash for Entry<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for Entry<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}': {}", self.key, self.value)
    }
}
