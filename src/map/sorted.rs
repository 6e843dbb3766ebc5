//! Sorted map with logarithmic rank and positional queries.

use crate::error::{MapError, Result};
use crate::map::order_tree::OrderTree;
use crate::map::{Entry, EntryStorage};

/// An associative container maintained in strictly ascending key order.
///
/// Backed by an arena-allocated AVL tree augmented with subtree sizes, so
/// lookup, insert, delete, and the rank queries all run in O(log n). The
/// common dictionary contract comes from [`MapApi`](crate::map::MapApi);
/// on top of it this type adds the positional surface: [`bisect_left`],
/// [`bisect_right`], and [`peekitem`].
///
/// Replacing the value for an existing key never changes its rank and never
/// creates a duplicate entry.
///
/// [`bisect_left`]: SortedMap::bisect_left
/// [`bisect_right`]: SortedMap::bisect_right
/// [`peekitem`]: SortedMap::peekitem
///
/// # Examples
///
/// ```rust
/// use entrymap::prelude::*;
///
/// let mut map = SortedMap::new();
/// map.insert(5, "a");
/// map.insert(1, "b");
/// map.insert(3, "c");
///
/// assert_eq!(map.keys().collect::<Vec<_>>(), [&1, &3, &5]);
/// assert_eq!(map.bisect_left(&3), 1);
/// assert_eq!(map.bisect_right(&3), 2);
/// assert_eq!(map.peekitem(0)?, (&1, &"b"));
/// assert_eq!(map.peekitem(-1)?, (&5, &"a"));
/// # Ok::<(), entrymap::MapError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SortedMap<K, V> {
    tree: OrderTree<K, V>,
}

impl<K, V> Default for SortedMap<K, V> {
    fn default() -> Self {
        SortedMap {
            tree: OrderTree::new(),
        }
    }
}

impl<K: Ord, V> SortedMap<K, V> {
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
            map.tree.insert(Entry::new(key, value));
        }
        map
    }

    /// Number of stored keys strictly less than `key`.
    ///
    /// This is the leftmost insertion index for `key`: the position that
    /// places it before any equal existing key. O(log n).
    pub fn bisect_left(&self, key: &K) -> usize {
        self.tree.rank_left(key)
    }

    /// Number of stored keys less than or equal to `key`.
    ///
    /// This is the insertion index after any existing equal key. For a
    /// present key, `bisect_right(k) == bisect_left(k) + 1`; for an absent
    /// key both are equal. O(log n).
    pub fn bisect_right(&self, key: &K) -> usize {
        self.tree.rank_right(key)
    }

    /// The key-value pair at `index` in ascending key order.
    ///
    /// Negative indices count from the end (`-1` is the largest key). An
    /// index outside `[-len, len)` fails with
    /// [`MapError::IndexOutOfRange`]; there is no wraparound beyond the
    /// single negative adjustment.
    pub fn peekitem(&self, index: isize) -> Result<(&K, &V)> {
        let len = self.tree.len();
        let resolved = if index < 0 {
            index + len as isize
        } else {
            index
        };
        if resolved < 0 || resolved as usize >= len {
            return Err(MapError::IndexOutOfRange { index, len });
        }
        match self.tree.select(resolved as usize) {
            Some(item) => Ok(item),
            None => Err(MapError::IndexOutOfRange { index, len }),
        }
    }
}

impl<K: Ord, V> EntryStorage<K, V> for SortedMap<K, V> {
    fn lookup(&self, key: &K) -> Option<&V> {
        self.tree.get(key)
    }

    fn store(&mut self, entry: Entry<K, V>) {
        self.tree.insert(entry);
    }

    fn discard(&mut self, key: &K) -> Option<Entry<K, V>> {
        self.tree.remove(key)
    }

    fn entry_count(&self) -> usize {
        self.tree.len()
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_> {
        Box::new(self.tree.iter())
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for SortedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}
