//! Arena-allocated AVL tree augmented with subtree sizes.
//!
//! Nodes live in a `Vec` and reference each other by index; slots vacated by
//! deletions go on a free list and are reused by later insertions. Each node
//! carries its subtree size, which makes rank (`rank_left` / `rank_right`)
//! and positional (`select`) queries O(log n) alongside the usual ordered
//! search, insert, and delete.

use std::cmp::Ordering;

use crate::map::Entry;

type NodeId = usize;

#[derive(Debug, Clone)]
struct Node<K, V> {
    entry: Entry<K, V>,
    left: Option<NodeId>,
    right: Option<NodeId>,
    height: u32,
    size: usize,
}

/// The backing structure of [`SortedMap`](crate::map::SortedMap).
///
/// Invariants after every public operation:
/// - keys are unique and in-order traversal yields them strictly ascending
/// - every node's balance factor is in `{-1, 0, 1}`
/// - every node's `size` is `1 + size(left) + size(right)`
#[derive(Debug, Clone)]
pub(crate) struct OrderTree<K, V> {
    slots: Vec<Option<Node<K, V>>>,
    free: Vec<NodeId>,
    root: Option<NodeId>,
}

impl<K, V> OrderTree<K, V> {
    pub(crate) fn new() -> Self {
        OrderTree {
            slots: Vec::new(),
            free: Vec::new(),
            root: None,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.subtree_size(self.root)
    }

    fn node(&self, id: NodeId) -> &Node<K, V> {
        self.slots[id].as_ref().expect("occupied node slot")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        self.slots[id].as_mut().expect("occupied node slot")
    }

    fn subtree_size(&self, id: Option<NodeId>) -> usize {
        id.map_or(0, |id| self.node(id).size)
    }

    fn height(&self, id: Option<NodeId>) -> u32 {
        id.map_or(0, |id| self.node(id).height)
    }

    fn alloc(&mut self, entry: Entry<K, V>) -> NodeId {
        let node = Node {
            entry,
            left: None,
            right: None,
            height: 1,
            size: 1,
        };
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

    fn release(&mut self, id: NodeId) -> Node<K, V> {
        self.free.push(id);
        self.slots[id].take().expect("released slot was occupied")
    }

    /// Recomputes `height` and `size` of `id` from its children.
    fn refresh(&mut self, id: NodeId) {
        let (left, right) = {
            let node = self.node(id);
            (node.left, node.right)
        };
        let height = 1 + self.height(left).max(self.height(right));
        let size = 1 + self.subtree_size(left) + self.subtree_size(right);
        let node = self.node_mut(id);
        node.height = height;
        node.size = size;
    }

    fn balance_factor(&self, id: NodeId) -> i32 {
        let node = self.node(id);
        self.height(node.left) as i32 - self.height(node.right) as i32
    }

    /// Left rotation; the right child becomes the subtree root.
    fn rotate_left(&mut self, id: NodeId) -> NodeId {
        let pivot = self.node(id).right.expect("rotate_left needs a right child");
        let pivot_left = self.node(pivot).left;
        self.node_mut(id).right = pivot_left;
        self.node_mut(pivot).left = Some(id);
        self.refresh(id);
        self.refresh(pivot);
        pivot
    }

    /// Right rotation; the left child becomes the subtree root.
    fn rotate_right(&mut self, id: NodeId) -> NodeId {
        let pivot = self.node(id).left.expect("rotate_right needs a left child");
        let pivot_right = self.node(pivot).right;
        self.node_mut(id).left = pivot_right;
        self.node_mut(pivot).right = Some(id);
        self.refresh(id);
        self.refresh(pivot);
        pivot
    }

    /// Restores the AVL balance of the subtree rooted at `id` and returns
    /// the (possibly new) subtree root.
    fn rebalance(&mut self, id: NodeId) -> NodeId {
        self.refresh(id);
        let factor = self.balance_factor(id);
        if factor > 1 {
            // A factor above 1 implies the left child exists.
            let left = self.node(id).left.expect("left-heavy node has a left child");
            if self.balance_factor(left) < 0 {
                let new_left = self.rotate_left(left);
                self.node_mut(id).left = Some(new_left);
            }
            self.rotate_right(id)
        } else if factor < -1 {
            let right = self
                .node(id)
                .right
                .expect("right-heavy node has a right child");
            if self.balance_factor(right) > 0 {
                let new_right = self.rotate_right(right);
                self.node_mut(id).right = Some(new_right);
            }
            self.rotate_left(id)
        } else {
            id
        }
    }

    /// Iterates entries in ascending key order.
    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        let mut stack = Vec::new();
        let mut cursor = self.root;
        while let Some(id) = cursor {
            stack.push(id);
            cursor = self.node(id).left;
        }
        Iter { tree: self, stack }
    }
}

impl<K: Ord, V> OrderTree<K, V> {
    pub(crate) fn get(&self, key: &K) -> Option<&V> {
        let mut cursor = self.root;
        while let Some(id) = cursor {
            let node = self.node(id);
            match key.cmp(node.entry.key()) {
                Ordering::Less => cursor = node.left,
                Ordering::Greater => cursor = node.right,
                Ordering::Equal => return Some(node.entry.value()),
            }
        }
        None
    }

    /// Inserts `entry`, replacing the record for an equal key in place.
    ///
    /// A replacement never changes the node's rank or the tree shape.
    pub(crate) fn insert(&mut self, entry: Entry<K, V>) -> Option<Entry<K, V>> {
        let root = self.root;
        let (new_root, replaced) = self.insert_at(root, entry);
        self.root = Some(new_root);
        replaced
    }

    fn insert_at(
        &mut self,
        root: Option<NodeId>,
        entry: Entry<K, V>,
    ) -> (NodeId, Option<Entry<K, V>>) {
        let id = match root {
            Some(id) => id,
            None => return (self.alloc(entry), None),
        };
        match entry.key().cmp(self.node(id).entry.key()) {
            Ordering::Less => {
                let left = self.node(id).left;
                let (new_left, replaced) = self.insert_at(left, entry);
                self.node_mut(id).left = Some(new_left);
                (self.rebalance(id), replaced)
            }
            Ordering::Greater => {
                let right = self.node(id).right;
                let (new_right, replaced) = self.insert_at(right, entry);
                self.node_mut(id).right = Some(new_right);
                (self.rebalance(id), replaced)
            }
            Ordering::Equal => {
                let old = std::mem::replace(&mut self.node_mut(id).entry, entry);
                (id, Some(old))
            }
        }
    }

    pub(crate) fn remove(&mut self, key: &K) -> Option<Entry<K, V>> {
        let root = self.root;
        let (new_root, removed) = self.remove_at(root, key);
        self.root = new_root;
        removed
    }

    fn remove_at(
        &mut self,
        root: Option<NodeId>,
        key: &K,
    ) -> (Option<NodeId>, Option<Entry<K, V>>) {
        let id = match root {
            Some(id) => id,
            None => return (None, None),
        };
        match key.cmp(self.node(id).entry.key()) {
            Ordering::Less => {
                let left = self.node(id).left;
                let (new_left, removed) = self.remove_at(left, key);
                if removed.is_none() {
                    return (Some(id), None);
                }
                self.node_mut(id).left = new_left;
                (Some(self.rebalance(id)), removed)
            }
            Ordering::Greater => {
                let right = self.node(id).right;
                let (new_right, removed) = self.remove_at(right, key);
                if removed.is_none() {
                    return (Some(id), None);
                }
                self.node_mut(id).right = new_right;
                (Some(self.rebalance(id)), removed)
            }
            Ordering::Equal => {
                let (left, right) = {
                    let node = self.node(id);
                    (node.left, node.right)
                };
                match (left, right) {
                    (None, child) | (child, None) => {
                        let node = self.release(id);
                        (child, Some(node.entry))
                    }
                    (Some(_), Some(right_id)) => {
                        // Two children: the in-order successor's entry takes
                        // this node's place, then the successor node is
                        // detached from the right subtree.
                        let (new_right, successor) = self.detach_min(right_id);
                        self.node_mut(id).right = new_right;
                        let removed =
                            std::mem::replace(&mut self.node_mut(id).entry, successor);
                        (Some(self.rebalance(id)), Some(removed))
                    }
                }
            }
        }
    }

    /// Detaches the minimum node of the subtree rooted at `id`, returning
    /// the rebalanced subtree root and the detached entry.
    fn detach_min(&mut self, id: NodeId) -> (Option<NodeId>, Entry<K, V>) {
        match self.node(id).left {
            Some(left) => {
                let (new_left, entry) = self.detach_min(left);
                self.node_mut(id).left = new_left;
                (Some(self.rebalance(id)), entry)
            }
            None => {
                let right = self.node(id).right;
                let node = self.release(id);
                (right, node.entry)
            }
        }
    }

    /// Number of stored keys strictly less than `key`.
    pub(crate) fn rank_left(&self, key: &K) -> usize {
        let mut rank = 0;
        let mut cursor = self.root;
        while let Some(id) = cursor {
            let node = self.node(id);
            if node.entry.key() < key {
                rank += self.subtree_size(node.left) + 1;
                cursor = node.right;
            } else {
                cursor = node.left;
            }
        }
        rank
    }

    /// Number of stored keys less than or equal to `key`.
    pub(crate) fn rank_right(&self, key: &K) -> usize {
        let mut rank = 0;
        let mut cursor = self.root;
        while let Some(id) = cursor {
            let node = self.node(id);
            if node.entry.key() <= key {
                rank += self.subtree_size(node.left) + 1;
                cursor = node.right;
            } else {
                cursor = node.left;
            }
        }
        rank
    }

    /// The entry at 0-based `rank` in ascending key order.
    pub(crate) fn select(&self, mut rank: usize) -> Option<(&K, &V)> {
        if rank >= self.len() {
            return None;
        }
        let mut cursor = self.root;
        while let Some(id) = cursor {
            let node = self.node(id);
            let left_size = self.subtree_size(node.left);
            match rank.cmp(&left_size) {
                Ordering::Less => cursor = node.left,
                Ordering::Equal => return Some((node.entry.key(), node.entry.value())),
                Ordering::Greater => {
                    rank -= left_size + 1;
                    cursor = node.right;
                }
            }
        }
        None
    }
}

/// In-order iterator over tree entries.
pub(crate) struct Iter<'a, K, V> {
    tree: &'a OrderTree<K, V>,
    stack: Vec<NodeId>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = self.tree.node(id);
        let mut cursor = node.right;
        while let Some(next) = cursor {
            self.stack.push(next);
            cursor = self.tree.node(next).left;
        }
        Some((node.entry.key(), node.entry.value()))
    }
}
