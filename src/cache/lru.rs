//! Bounded-capacity cache with least-recently-used eviction.
//!
//! The cache composes a hash index with an arena-allocated doubly linked
//! list: the index maps each key to its list node, and the list orders keys
//! from least- to most-recently used. Moving a node to the back and popping
//! the front are both O(1), so every cache operation is O(1) average.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::error::{MapError, Result};

type NodeId = usize;

#[derive(Debug, Clone)]
struct LruNode<K, V> {
    key: K,
    value: V,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

/// A fixed-capacity key-value cache that evicts the least-recently-used
/// entry on overflow.
///
/// Position in the internal list encodes recency: the front holds the
/// least-recently-used key, the back the most-recently-used. Both [`get`]
/// and [`insert`] move the touched key to the back; [`peek`],
/// [`contains_key`], and [`iter`] have no recency side effect. After every
/// public operation, `len() <= capacity()`.
///
/// Inserting a new key into a full cache evicts exactly the front entry;
/// updating an already-present key never evicts.
///
/// [`get`]: LruCache::get
/// [`insert`]: LruCache::insert
/// [`peek`]: LruCache::peek
/// [`contains_key`]: LruCache::contains_key
/// [`iter`]: LruCache::iter
///
/// # Examples
///
/// ```rust
/// use entrymap::prelude::*;
///
/// let mut cache = LruCache::new(2)?;
/// cache.insert("x", 10);
/// cache.insert("y", 20);
/// cache.insert("z", 30); // evicts "x"
///
/// assert!(!cache.contains_key(&"x"));
/// assert_eq!(cache.get(&"y")?, &20);
/// assert_eq!(cache.get(&"z")?, &30);
/// # Ok::<(), entrymap::MapError>(())
/// ```
#[derive(Debug, Clone)]
pub struct LruCache<K, V> {
    index: FxHashMap<K, NodeId>,
    slots: Vec<Option<LruNode<K, V>>>,
    free: Vec<NodeId>,
    /// Least-recently-used end.
    head: Option<NodeId>,
    /// Most-recently-used end.
    tail: Option<NodeId>,
    capacity: usize,
}

impl<K, V> LruCache<K, V> {
    fn node(&self, id: NodeId) -> &LruNode<K, V> {
        self.slots[id].as_ref().expect("occupied node slot")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut LruNode<K, V> {
        self.slots[id].as_mut().expect("occupied node slot")
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// The fixed maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The least-recently-used entry, without refreshing its recency.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.head.map(|id| {
            let node = self.node(id);
            (&node.key, &node.value)
        })
    }

    /// Iterates entries from least- to most-recently used. No side effect.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            cache: self,
            cursor: self.head,
        }
    }

    /// Unlinks `id` from the recency list, fixing up head/tail cursors.
    fn detach(&mut self, id: NodeId) {
        let (prev, next) = {
            let node = self.node(id);
            (node.prev, node.next)
        };
        match prev {
            Some(prev) => self.node_mut(prev).next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.node_mut(next).prev = prev,
            None => self.tail = prev,
        }
        let node = self.node_mut(id);
        node.prev = None;
        node.next = None;
    }

    /// Links a detached `id` at the most-recently-used end.
    fn push_back(&mut self, id: NodeId) {
        let old_tail = self.tail;
        {
            let node = self.node_mut(id);
            node.prev = old_tail;
            node.next = None;
        }
        match old_tail {
            Some(tail) => self.node_mut(tail).next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
    }

    /// Moves `id` to the most-recently-used position.
    fn touch(&mut self, id: NodeId) {
        if self.tail == Some(id) {
            return;
        }
        self.detach(id);
        self.push_back(id);
    }

    fn alloc(&mut self, node: LruNode<K, V>) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.slots[id] = Some(node);
                id
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        }
    }

    fn release(&mut self, id: NodeId) -> LruNode<K, V> {
        self.free.push(id);
        self.slots[id].take().expect("released slot was occupied")
    }
}

impl<K: Eq + Hash + Clone, V> LruCache<K, V> {
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// Fails with [`MapError::InvalidCapacity`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(MapError::InvalidCapacity(capacity));
        }
        Ok(LruCache {
            index: FxHashMap::default(),
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            capacity,
        })
    }

    /// Returns the value for `key`, refreshing its recency.
    ///
    /// Fails with [`MapError::KeyNotFound`] if the key is absent. On a hit
    /// the key becomes the most-recently-used entry; repeating the call
    /// immediately leaves it there, with no further change.
    pub fn get(&mut self, key: &K) -> Result<&V> {
        let id = match self.index.get(key) {
            Some(&id) => id,
            None => return Err(MapError::KeyNotFound),
        };
        self.touch(id);
        Ok(&self.node(id).value)
    }

    /// Inserts or updates `key`, making it the most-recently-used entry.
    ///
    /// If the key is already present its value is replaced and no eviction
    /// happens. If the key is new and the cache is full, the front
    /// (least-recently-used) entry is evicted first; exactly one entry is
    /// ever evicted per insert.
    pub fn insert(&mut self, key: K, value: V) {
        if let Some(&id) = self.index.get(&key) {
            self.node_mut(id).value = value;
            self.touch(id);
            return;
        }
        if self.index.len() == self.capacity {
            self.evict_front();
        }
        let id = self.alloc(LruNode {
            key: key.clone(),
            value,
            prev: None,
            next: None,
        });
        self.push_back(id);
        self.index.insert(key, id);
    }

    /// Returns the value for `key` without refreshing its recency.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.index.get(key).map(|&id| &self.node(id).value)
    }

    /// Returns `true` if `key` is cached. No recency side effect.
    pub fn contains_key(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Removes `key`, returning its value if it was cached.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.index.remove(key)?;
        self.detach(id);
        Some(self.release(id).value)
    }

    fn evict_front(&mut self) {
        let id = match self.head {
            Some(id) => id,
            None => return,
        };
        self.detach(id);
        let node = self.release(id);
        self.index.remove(&node.key);
    }
}

/// Iterator over cache entries in recency order, least-recently-used first.
pub struct Iter<'a, K, V> {
    cache: &'a LruCache<K, V>,
    cursor: Option<NodeId>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let node = self.cache.node(id);
        self.cursor = node.next;
        Some((&node.key, &node.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recency_keys<K: Clone, V>(cache: &LruCache<K, V>) -> Vec<K> {
        cache.iter().map(|(k, _)| k.clone()).collect()
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        assert_eq!(
            LruCache::<i32, i32>::new(0).err(),
            Some(MapError::InvalidCapacity(0))
        );
    }

    #[test]
    fn test_overflow_evicts_only_the_lru_entry() {
        let mut cache = LruCache::new(2).unwrap();
        cache.insert("x", 10);
        cache.insert("y", 20);
        cache.insert("z", 30);

        assert!(!cache.contains_key(&"x"));
        assert_eq!(cache.get(&"y"), Ok(&20));
        assert_eq!(cache.get(&"z"), Ok(&30));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_get_refreshes_recency() {
        let mut cache = LruCache::new(3).unwrap();
        cache.insert(1, 'a');
        cache.insert(2, 'b');
        cache.insert(3, 'c');

        // Reading 1 makes 2 the eviction candidate.
        assert_eq!(cache.get(&1), Ok(&'a'));
        cache.insert(4, 'd');

        assert!(cache.contains_key(&1));
        assert!(!cache.contains_key(&2));
        assert!(cache.contains_key(&3));
        assert!(cache.contains_key(&4));
    }

    #[test]
    fn test_read_then_fill_evicts_everything_but_the_read_key() {
        let capacity = 4;
        let mut cache = LruCache::new(capacity).unwrap();
        for i in 0..capacity {
            cache.insert(i, i);
        }
        cache.get(&2).unwrap();

        for i in 0..capacity {
            cache.insert(100 + i, i);
        }

        let survivors: Vec<_> = (0..capacity).filter(|k| cache.contains_key(k)).collect();
        assert!(survivors.is_empty());
        // One more read before the refill keeps exactly that key alive.
        let mut cache = LruCache::new(capacity).unwrap();
        for i in 0..capacity {
            cache.insert(i, i);
        }
        cache.get(&2).unwrap();
        for i in 0..capacity - 1 {
            cache.insert(100 + i, i);
        }
        let survivors: Vec<_> = (0..capacity).filter(|k| cache.contains_key(k)).collect();
        assert_eq!(survivors, [2]);
    }

    #[test]
    fn test_update_existing_key_never_evicts() {
        let mut cache = LruCache::new(2).unwrap();
        cache.insert(1, 10);
        cache.insert(2, 20);

        cache.insert(1, 100);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.peek(&1), Some(&100));
        assert_eq!(cache.peek(&2), Some(&20));
        // The update also made key 1 most recent.
        assert_eq!(recency_keys(&cache), [2, 1]);
    }

    #[test]
    fn test_single_capacity_cache() {
        let mut cache = LruCache::new(1).unwrap();
        cache.insert("a", 1);
        cache.insert("b", 2);
        assert!(!cache.contains_key(&"a"));
        assert_eq!(cache.get(&"b"), Ok(&2));

        // Updating the sole resident key never evicts.
        cache.insert("b", 3);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&"b"), Ok(&3));
    }

    #[test]
    fn test_get_missing_key_fails() {
        let mut cache = LruCache::<&str, i32>::new(2).unwrap();
        assert_eq!(cache.get(&"nope"), Err(MapError::KeyNotFound));
    }

    #[test]
    fn test_repeated_get_is_idempotent() {
        let mut cache = LruCache::new(3).unwrap();
        cache.insert(1, 'a');
        cache.insert(2, 'b');

        cache.get(&1).unwrap();
        let order_after_first = recency_keys(&cache);
        cache.get(&1).unwrap();
        assert_eq!(recency_keys(&cache), order_after_first);
    }

    #[test]
    fn test_peek_and_contains_have_no_side_effect() {
        let mut cache = LruCache::new(2).unwrap();
        cache.insert(1, 10);
        cache.insert(2, 20);

        assert_eq!(cache.peek(&1), Some(&10));
        assert!(cache.contains_key(&1));
        assert_eq!(recency_keys(&cache), [1, 2]);

        cache.insert(3, 30);
        assert!(!cache.contains_key(&1));
    }

    #[test]
    fn test_peek_lru_tracks_the_front() {
        let mut cache = LruCache::new(3).unwrap();
        assert_eq!(cache.peek_lru(), None);

        cache.insert(1, 10);
        cache.insert(2, 20);
        assert_eq!(cache.peek_lru(), Some((&1, &10)));

        cache.get(&1).unwrap();
        assert_eq!(cache.peek_lru(), Some((&2, &20)));
    }

    #[test]
    fn test_remove_and_slot_reuse() {
        let mut cache = LruCache::new(3).unwrap();
        cache.insert(1, 10);
        cache.insert(2, 20);
        cache.insert(3, 30);
        let slots_before = cache.slots.len();

        assert_eq!(cache.remove(&2), Some(20));
        assert_eq!(cache.remove(&2), None);
        assert_eq!(cache.len(), 2);
        assert_eq!(recency_keys(&cache), [1, 3]);

        cache.insert(4, 40);
        assert_eq!(cache.slots.len(), slots_before);
        assert_eq!(recency_keys(&cache), [1, 3, 4]);
    }

    #[test]
    fn test_iter_orders_lru_to_mru() {
        let mut cache = LruCache::new(3).unwrap();
        cache.insert(1, 'a');
        cache.insert(2, 'b');
        cache.insert(3, 'c');
        cache.get(&2).unwrap();

        assert_eq!(recency_keys(&cache), [1, 3, 2]);
    }

    #[test]
    fn test_len_never_exceeds_capacity() {
        let mut cache = LruCache::new(5).unwrap();
        for i in 0..100 {
            cache.insert(i % 13, i);
            assert!(cache.len() <= cache.capacity());
        }
    }
}
