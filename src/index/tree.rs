//! Arena-backed red-black tree keyed by integer identifiers
//!
//! Nodes live in a `Vec` and link to each other by slot index; slot 0 is the
//! shared black sentinel. Parent links are plain indices, so there are no
//! ownership cycles and each tree instance has its own sentinel.
//!
//! # Color-flip accounting
//!
//! Every recolor during an insert or delete goes through `recolor`, which
//! journals the first-seen color of each touched node. When the operation
//! finishes the counter grows by the number of surviving journaled nodes
//! whose color differs from the journaled one. A newly inserted node counts
//! when fixup turns it black; the first node of an empty tree is created
//! black and never counts. The node removed by a delete is not counted.

use std::cmp::Ordering;

use super::errors::{IndexError, IndexErrorCode, IndexResult};
use super::node::{Color, Node, NodeId, NIL};

/// Tree key type
pub type Key = u64;

/// Closest keys on either side of a probe
#[derive(Debug)]
pub struct Neighbors<'a, V> {
    /// Largest key below the probe, or the exact match
    pub lower: Option<(Key, &'a V)>,
    /// Smallest key above the probe, or the exact match
    pub upper: Option<(Key, &'a V)>,
}

impl<V> Neighbors<'_, V> {
    /// Returns true when the probe key itself is present
    pub fn is_exact(&self) -> bool {
        matches!((self.lower, self.upper), (Some((lo, _)), Some((hi, _))) if lo == hi)
    }
}

/// Red-black tree with an embedded color-flip counter.
#[derive(Debug, Clone)]
pub struct RedBlackTree<V> {
    nodes: Vec<Node<V>>,
    free: Vec<NodeId>,
    root: NodeId,
    len: usize,
    color_flips: u64,
    /// (node, color before the current operation)
    journal: Vec<(NodeId, Color)>,
}

impl<V> Default for RedBlackTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> RedBlackTree<V> {
    /// Creates an empty tree
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::sentinel()],
            free: Vec::new(),
            root: NIL,
            len: 0,
            color_flips: 0,
            journal: Vec::new(),
        }
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true when the tree holds no keys
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Cumulative count of color changes made by rebalancing
    pub fn color_flip_count(&self) -> u64 {
        self.color_flips
    }

    /// Insert `value` under `key`.
    ///
    /// Returns false and drops `value` if `key` is already present; the
    /// existing entry is left untouched.
    pub fn insert(&mut self, key: Key, value: V) -> bool {
        let mut parent = NIL;
        let mut cursor = self.root;
        while cursor != NIL {
            parent = cursor;
            cursor = match key.cmp(&self.nodes[cursor].key) {
                Ordering::Less => self.nodes[cursor].left,
                Ordering::Greater => self.nodes[cursor].right,
                Ordering::Equal => return false,
            };
        }

        let inserted = self.allocate(Node::leaf(key, value, parent));
        self.len += 1;
        if parent == NIL {
            // The first node of an empty tree is created black
            self.root = inserted;
            self.nodes[inserted].color = Color::Black;
            return true;
        }
        if key < self.nodes[parent].key {
            self.nodes[parent].left = inserted;
        } else {
            self.nodes[parent].right = inserted;
        }

        self.journal.clear();
        self.insert_fixup(inserted);
        self.settle_journal(NIL);
        true
    }

    /// Remove `key`, returning its payload.
    pub fn delete(&mut self, key: Key) -> Option<V> {
        let target = self.find(key);
        if target == NIL {
            return None;
        }
        self.journal.clear();

        let mut removed_color = self.color(target);
        let replacement;
        if self.left(target) == NIL {
            replacement = self.right(target);
            self.replace_child(target, replacement);
        } else if self.right(target) == NIL {
            replacement = self.left(target);
            self.replace_child(target, replacement);
        } else {
            let successor = self.minimum(self.right(target));
            removed_color = self.color(successor);
            replacement = self.right(successor);

            if self.parent(successor) == target {
                // replacement may be the sentinel; its parent link is scratch
                self.nodes[replacement].parent = successor;
            } else {
                self.replace_child(successor, replacement);
                let right = self.right(target);
                self.nodes[successor].right = right;
                self.nodes[right].parent = successor;
            }

            self.replace_child(target, successor);
            let left = self.left(target);
            self.nodes[successor].left = left;
            self.nodes[left].parent = successor;
            let inherited = self.color(target);
            self.recolor(successor, inherited);
        }

        if removed_color == Color::Black {
            self.delete_fixup(replacement);
        }
        self.nodes[NIL].parent = NIL;

        self.settle_journal(target);
        self.len -= 1;
        self.release(target)
    }

    /// Exact lookup
    pub fn get(&self, key: Key) -> Option<&V> {
        self.nodes[self.find(key)].value.as_ref()
    }

    /// Exact lookup for in-place mutation of the payload
    pub fn get_mut(&mut self, key: Key) -> Option<&mut V> {
        let id = self.find(key);
        self.nodes[id].value.as_mut()
    }

    /// Returns true when `key` is stored
    pub fn contains(&self, key: Key) -> bool {
        self.find(key) != NIL
    }

    /// Closest keys at or around `key`, found in a single descent.
    ///
    /// An exact match is reported as both `lower` and `upper`.
    pub fn nearest(&self, key: Key) -> Neighbors<'_, V> {
        let mut lower = NIL;
        let mut upper = NIL;
        let mut cursor = self.root;
        while cursor != NIL {
            let node = &self.nodes[cursor];
            match node.key.cmp(&key) {
                Ordering::Equal => {
                    lower = cursor;
                    upper = cursor;
                    break;
                }
                Ordering::Less => {
                    lower = cursor;
                    cursor = node.right;
                }
                Ordering::Greater => {
                    upper = cursor;
                    cursor = node.left;
                }
            }
        }
        Neighbors {
            lower: self.entry(lower),
            upper: self.entry(upper),
        }
    }

    /// In-order iterator over keys in `[lo, hi]`
    pub fn range(&self, lo: Key, hi: Key) -> Range<'_, V> {
        let mut stack = Vec::new();
        if lo <= hi {
            let mut cursor = self.root;
            while cursor != NIL {
                if self.nodes[cursor].key < lo {
                    cursor = self.nodes[cursor].right;
                } else {
                    stack.push(cursor);
                    cursor = self.nodes[cursor].left;
                }
            }
        }
        Range {
            tree: self,
            stack,
            hi,
        }
    }

    /// In-order iterator over every entry
    pub fn iter(&self) -> Range<'_, V> {
        self.range(Key::MIN, Key::MAX)
    }

    /// Color of the node stored under `key`
    pub fn color_of(&self, key: Key) -> Option<Color> {
        let id = self.find(key);
        (id != NIL).then(|| self.nodes[id].color)
    }

    /// Every key with its color, in key order
    pub fn color_snapshot(&self) -> Vec<(Key, Color)> {
        let mut out = Vec::with_capacity(self.len);
        let mut stack = Vec::new();
        let mut cursor = self.root;
        while cursor != NIL || !stack.is_empty() {
            while cursor != NIL {
                stack.push(cursor);
                cursor = self.nodes[cursor].left;
            }
            if let Some(id) = stack.pop() {
                out.push((self.nodes[id].key, self.nodes[id].color));
                cursor = self.nodes[id].right;
            }
        }
        out
    }

    /// Check every structural invariant, returning the root's black-height.
    pub fn validate(&self) -> IndexResult<usize> {
        if self.nodes[NIL].color != Color::Black {
            return Err(IndexError::tree_wide(
                IndexErrorCode::SentinelNotBlack,
                "sentinel is red",
            ));
        }
        if self.root != NIL {
            if self.nodes[self.root].color != Color::Black {
                return Err(IndexError::at_key(
                    IndexErrorCode::RootNotBlack,
                    self.nodes[self.root].key,
                    "root is red",
                ));
            }
            if self.nodes[self.root].parent != NIL {
                return Err(IndexError::at_key(
                    IndexErrorCode::ParentLink,
                    self.nodes[self.root].key,
                    "root has a parent",
                ));
            }
        }

        let mut count = 0;
        let height = self.validate_subtree(self.root, None, None, &mut count)?;
        if count != self.len {
            return Err(IndexError::tree_wide(
                IndexErrorCode::Count,
                format!("{} reachable, {} recorded", count, self.len),
            ));
        }
        Ok(height)
    }

    fn validate_subtree(
        &self,
        id: NodeId,
        min: Option<Key>,
        max: Option<Key>,
        count: &mut usize,
    ) -> IndexResult<usize> {
        if id == NIL {
            return Ok(0);
        }
        *count += 1;
        let node = &self.nodes[id];

        if min.is_some_and(|m| node.key <= m) || max.is_some_and(|m| node.key >= m) {
            return Err(IndexError::at_key(
                IndexErrorCode::Order,
                node.key,
                "key outside the bounds set by its ancestors",
            ));
        }
        for child in [node.left, node.right] {
            if child == NIL {
                continue;
            }
            if self.nodes[child].parent != id {
                return Err(IndexError::at_key(
                    IndexErrorCode::ParentLink,
                    self.nodes[child].key,
                    "child does not link back to its parent",
                ));
            }
            if node.color == Color::Red && self.nodes[child].color == Color::Red {
                return Err(IndexError::at_key(
                    IndexErrorCode::RedRed,
                    node.key,
                    "red node has a red child",
                ));
            }
        }

        let left = self.validate_subtree(node.left, min, Some(node.key), count)?;
        let right = self.validate_subtree(node.right, Some(node.key), max, count)?;
        if left != right {
            return Err(IndexError::at_key(
                IndexErrorCode::BlackHeight,
                node.key,
                format!("left black-height {} != right black-height {}", left, right),
            ));
        }
        Ok(left + usize::from(node.color == Color::Black))
    }

    // =========================================================================
    // Arena bookkeeping
    // =========================================================================

    fn allocate(&mut self, node: Node<V>) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.nodes[id] = node;
                id
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    fn release(&mut self, id: NodeId) -> Option<V> {
        let node = &mut self.nodes[id];
        node.parent = NIL;
        node.left = NIL;
        node.right = NIL;
        node.color = Color::Black;
        let value = node.value.take();
        self.free.push(id);
        value
    }

    fn entry(&self, id: NodeId) -> Option<(Key, &V)> {
        let node = &self.nodes[id];
        node.value.as_ref().map(|v| (node.key, v))
    }

    fn find(&self, key: Key) -> NodeId {
        let mut cursor = self.root;
        while cursor != NIL {
            cursor = match key.cmp(&self.nodes[cursor].key) {
                Ordering::Less => self.nodes[cursor].left,
                Ordering::Greater => self.nodes[cursor].right,
                Ordering::Equal => return cursor,
            };
        }
        NIL
    }

    fn minimum(&self, mut id: NodeId) -> NodeId {
        while self.nodes[id].left != NIL {
            id = self.nodes[id].left;
        }
        id
    }

    #[inline]
    fn color(&self, id: NodeId) -> Color {
        self.nodes[id].color
    }

    #[inline]
    fn parent(&self, id: NodeId) -> NodeId {
        self.nodes[id].parent
    }

    #[inline]
    fn left(&self, id: NodeId) -> NodeId {
        self.nodes[id].left
    }

    #[inline]
    fn right(&self, id: NodeId) -> NodeId {
        self.nodes[id].right
    }

    // =========================================================================
    // Color accounting
    // =========================================================================

    /// Set a node's color, journaling its prior color on first touch.
    fn recolor(&mut self, id: NodeId, color: Color) {
        if id == NIL || self.nodes[id].color == color {
            return;
        }
        if !self.journal.iter().any(|(seen, _)| *seen == id) {
            self.journal.push((id, self.nodes[id].color));
        }
        self.nodes[id].color = color;
    }

    /// Fold the journal into the counter, skipping `exclude`.
    fn settle_journal(&mut self, exclude: NodeId) {
        let changed = self
            .journal
            .iter()
            .filter(|(id, before)| {
                *id != exclude && self.nodes[*id].is_live() && self.nodes[*id].color != *before
            })
            .count();
        self.color_flips += changed as u64;
        self.journal.clear();
    }

    // =========================================================================
    // Rotations
    // =========================================================================

    fn rotate_left(&mut self, x: NodeId) {
        let y = self.right(x);
        let inner = self.left(y);
        self.nodes[x].right = inner;
        if inner != NIL {
            self.nodes[inner].parent = x;
        }
        self.replace_child(x, y);
        self.nodes[y].left = x;
        self.nodes[x].parent = y;
    }

    fn rotate_right(&mut self, x: NodeId) {
        let y = self.left(x);
        let inner = self.right(y);
        self.nodes[x].left = inner;
        if inner != NIL {
            self.nodes[inner].parent = x;
        }
        self.replace_child(x, y);
        self.nodes[y].right = x;
        self.nodes[x].parent = y;
    }

    /// Hang `new` where `old` hangs from its parent (or at the root).
    ///
    /// `new` may be the sentinel, whose parent link then points at the
    /// splice point for delete-fixup.
    fn replace_child(&mut self, old: NodeId, new: NodeId) {
        let parent = self.parent(old);
        if parent == NIL {
            self.root = new;
        } else if self.left(parent) == old {
            self.nodes[parent].left = new;
        } else {
            self.nodes[parent].right = new;
        }
        self.nodes[new].parent = parent;
    }

    // =========================================================================
    // Rebalancing
    // =========================================================================

    fn insert_fixup(&mut self, mut z: NodeId) {
        while self.color(self.parent(z)) == Color::Red {
            let parent = self.parent(z);
            let grandparent = self.parent(parent);

            if parent == self.left(grandparent) {
                let uncle = self.right(grandparent);
                if self.color(uncle) == Color::Red {
                    self.recolor(parent, Color::Black);
                    self.recolor(uncle, Color::Black);
                    self.recolor(grandparent, Color::Red);
                    z = grandparent;
                } else {
                    if z == self.right(parent) {
                        z = parent;
                        self.rotate_left(z);
                    }
                    let parent = self.parent(z);
                    let grandparent = self.parent(parent);
                    self.recolor(parent, Color::Black);
                    self.recolor(grandparent, Color::Red);
                    self.rotate_right(grandparent);
                }
            } else {
                let uncle = self.left(grandparent);
                if self.color(uncle) == Color::Red {
                    self.recolor(parent, Color::Black);
                    self.recolor(uncle, Color::Black);
                    self.recolor(grandparent, Color::Red);
                    z = grandparent;
                } else {
                    if z == self.left(parent) {
                        z = parent;
                        self.rotate_right(z);
                    }
                    let parent = self.parent(z);
                    let grandparent = self.parent(parent);
                    self.recolor(parent, Color::Black);
                    self.recolor(grandparent, Color::Red);
                    self.rotate_left(grandparent);
                }
            }
        }
        let root = self.root;
        self.recolor(root, Color::Black);
    }

    fn delete_fixup(&mut self, mut x: NodeId) {
        while x != self.root && self.color(x) == Color::Black {
            let parent = self.parent(x);
            if x == self.left(parent) {
                let mut sibling = self.right(parent);
                if self.color(sibling) == Color::Red {
                    self.recolor(sibling, Color::Black);
                    self.recolor(parent, Color::Red);
                    self.rotate_left(parent);
                    sibling = self.right(self.parent(x));
                }
                if self.color(self.left(sibling)) == Color::Black
                    && self.color(self.right(sibling)) == Color::Black
                {
                    self.recolor(sibling, Color::Red);
                    x = self.parent(x);
                } else {
                    if self.color(self.right(sibling)) == Color::Black {
                        let inner = self.left(sibling);
                        self.recolor(inner, Color::Black);
                        self.recolor(sibling, Color::Red);
                        self.rotate_right(sibling);
                        sibling = self.right(self.parent(x));
                    }
                    let parent = self.parent(x);
                    let parent_color = self.color(parent);
                    self.recolor(sibling, parent_color);
                    self.recolor(parent, Color::Black);
                    let outer = self.right(sibling);
                    self.recolor(outer, Color::Black);
                    self.rotate_left(parent);
                    x = self.root;
                }
            } else {
                let mut sibling = self.left(parent);
                if self.color(sibling) == Color::Red {
                    self.recolor(sibling, Color::Black);
                    self.recolor(parent, Color::Red);
                    self.rotate_right(parent);
                    sibling = self.left(self.parent(x));
                }
                if self.color(self.right(sibling)) == Color::Black
                    && self.color(self.left(sibling)) == Color::Black
                {
                    self.recolor(sibling, Color::Red);
                    x = self.parent(x);
                } else {
                    if self.color(self.left(sibling)) == Color::Black {
                        let inner = self.right(sibling);
                        self.recolor(inner, Color::Black);
                        self.recolor(sibling, Color::Red);
                        self.rotate_left(sibling);
                        sibling = self.left(self.parent(x));
                    }
                    let parent = self.parent(x);
                    let parent_color = self.color(parent);
                    self.recolor(sibling, parent_color);
                    self.recolor(parent, Color::Black);
                    let outer = self.left(sibling);
                    self.recolor(outer, Color::Black);
                    self.rotate_right(parent);
                    x = self.root;
                }
            }
        }
        self.recolor(x, Color::Black);
    }
}

/// Lazy in-order walk over a key range.
pub struct Range<'a, V> {
    tree: &'a RedBlackTree<V>,
    stack: Vec<NodeId>,
    hi: Key,
}

impl<'a, V> Iterator for Range<'a, V> {
    type Item = (Key, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let tree = self.tree;
        let node = &tree.nodes[id];
        if node.key > self.hi {
            self.stack.clear();
            return None;
        }

        // Everything right of `node` is above `lo` already
        let mut cursor = node.right;
        while cursor != NIL {
            self.stack.push(cursor);
            cursor = tree.nodes[cursor].left;
        }
        node.value.as_ref().map(|v| (node.key, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_of(keys: &[Key]) -> RedBlackTree<String> {
        let mut tree = RedBlackTree::new();
        for &k in keys {
            tree.insert(k, format!("v{}", k));
        }
        tree
    }

    fn keys(tree: &RedBlackTree<String>) -> Vec<Key> {
        tree.iter().map(|(k, _)| k).collect()
    }

    #[test]
    fn test_empty_tree() {
        let tree: RedBlackTree<()> = RedBlackTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.validate(), Ok(0));
        assert!(tree.get(1).is_none());
        assert_eq!(tree.color_flip_count(), 0);
    }

    #[test]
    fn test_first_insert_is_black_root_without_flip() {
        let tree = tree_of(&[10]);
        assert_eq!(tree.color_of(10), Some(Color::Black));
        assert_eq!(tree.color_flip_count(), 0);
    }

    #[test]
    fn test_ascending_inserts_stay_balanced() {
        let tree = tree_of(&(1..=64).collect::<Vec<_>>());
        assert_eq!(keys(&tree), (1..=64).collect::<Vec<_>>());
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_duplicate_insert_is_ignored() {
        let mut tree = tree_of(&[5, 3, 8]);
        let flips = tree.color_flip_count();
        assert!(!tree.insert(5, "other".to_string()));
        assert_eq!(tree.get(5).map(String::as_str), Some("v5"));
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.color_flip_count(), flips);
    }

    #[test]
    fn test_uncle_red_recolor_counts_only_real_changes() {
        // 20 is a black root with red children 10 and 30
        let mut tree = tree_of(&[20, 10, 30]);
        assert_eq!(tree.color_flip_count(), 0);

        // Uncle case: 10 and 30 go black, 20 goes red then is forced back black
        tree.insert(5, "v5".to_string());
        assert_eq!(tree.color_of(20), Some(Color::Black));
        assert_eq!(tree.color_of(10), Some(Color::Black));
        assert_eq!(tree.color_of(30), Some(Color::Black));
        assert_eq!(tree.color_flip_count(), 2);
    }

    #[test]
    fn test_rotation_case_counts_parent_and_grandparent() {
        // 30 -> 20 -> 10 forces a right rotation at 30
        let tree = tree_of(&[30, 20]);
        assert_eq!(tree.color_flip_count(), 0);
        let mut tree = tree;
        tree.insert(10, "v10".to_string());

        assert_eq!(tree.color_of(20), Some(Color::Black));
        assert_eq!(tree.color_of(30), Some(Color::Red));
        assert_eq!(tree.color_flip_count(), 2);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_zig_zag_counts_new_node_turning_black() {
        // 20 lands right of 10: rotate at 10, then 20 goes black, 30 red
        let mut tree = tree_of(&[30, 10]);
        tree.insert(20, "v20".to_string());

        assert_eq!(tree.color_of(20), Some(Color::Black));
        assert_eq!(tree.color_of(10), Some(Color::Red));
        assert_eq!(tree.color_of(30), Some(Color::Red));
        assert_eq!(tree.color_flip_count(), 2);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_zig_zag_mirror_counts_new_node_turning_black() {
        let mut tree = tree_of(&[10, 30]);
        tree.insert(20, "v20".to_string());

        assert_eq!(tree.color_of(20), Some(Color::Black));
        assert_eq!(tree.color_of(10), Some(Color::Red));
        assert_eq!(tree.color_of(30), Some(Color::Red));
        assert_eq!(tree.color_flip_count(), 2);
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let mut tree = tree_of(&[1, 2, 3]);
        assert!(tree.delete(99).is_none());
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_delete_returns_value_and_rebalances() {
        let mut tree = tree_of(&(1..=31).collect::<Vec<_>>());
        for k in (1..=31).step_by(3) {
            assert_eq!(tree.delete(k), Some(format!("v{}", k)));
            assert!(tree.validate().is_ok());
            assert!(!tree.contains(k));
        }
        assert_eq!(tree.len(), 31 - 11);
    }

    #[test]
    fn test_delete_root_with_two_children() {
        let mut tree = tree_of(&[20, 10, 30, 25, 35]);
        assert!(tree.delete(20).is_some());
        assert_eq!(keys(&tree), vec![10, 25, 30, 35]);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_delete_everything() {
        let mut tree = tree_of(&[8, 4, 12, 2, 6, 10, 14, 1, 3]);
        for k in [8, 1, 14, 4, 12, 3, 2, 6, 10] {
            tree.delete(k);
            assert!(tree.validate().is_ok());
        }
        assert!(tree.is_empty());
        assert_eq!(tree.validate(), Ok(0));
    }

    #[test]
    fn test_slots_are_recycled() {
        let mut tree = tree_of(&[1, 2, 3]);
        tree.delete(2);
        tree.insert(4, "v4".to_string());
        assert_eq!(tree.nodes.len(), 4);
        assert_eq!(keys(&tree), vec![1, 3, 4]);
    }

    #[test]
    fn test_nearest_between_keys() {
        let tree = tree_of(&[10, 20, 30]);
        let n = tree.nearest(15);
        assert_eq!(n.lower.map(|(k, _)| k), Some(10));
        assert_eq!(n.upper.map(|(k, _)| k), Some(20));
        assert!(!n.is_exact());
    }

    #[test]
    fn test_nearest_exact_and_edges() {
        let tree = tree_of(&[10, 20, 30]);
        let exact = tree.nearest(20);
        assert!(exact.is_exact());

        let below = tree.nearest(3);
        assert!(below.lower.is_none());
        assert_eq!(below.upper.map(|(k, _)| k), Some(10));

        let above = tree.nearest(99);
        assert_eq!(above.lower.map(|(k, _)| k), Some(30));
        assert!(above.upper.is_none());
    }

    #[test]
    fn test_nearest_on_empty_tree() {
        let tree: RedBlackTree<()> = RedBlackTree::new();
        let n = tree.nearest(5);
        assert!(n.lower.is_none() && n.upper.is_none());
    }

    #[test]
    fn test_range_inclusive_bounds() {
        let tree = tree_of(&[5, 1, 9, 3, 7, 11]);
        let got: Vec<_> = tree.range(3, 9).map(|(k, _)| k).collect();
        assert_eq!(got, vec![3, 5, 7, 9]);

        let got: Vec<_> = tree.range(4, 4).map(|(k, _)| k).collect();
        assert!(got.is_empty());

        let got: Vec<_> = tree.range(9, 3).map(|(k, _)| k).collect();
        assert!(got.is_empty());
    }

    #[test]
    fn test_zero_is_an_ordinary_key() {
        let mut tree = tree_of(&[0, 5]);
        assert!(tree.contains(0));
        assert_eq!(tree.nearest(1).lower.map(|(k, _)| k), Some(0));
        assert!(tree.delete(0).is_some());
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_get_mut_updates_payload() {
        let mut tree = tree_of(&[1, 2]);
        if let Some(v) = tree.get_mut(2) {
            v.push('!');
        }
        assert_eq!(tree.get(2).map(String::as_str), Some("v2!"));
    }

    #[test]
    fn test_validate_detects_red_root() {
        let mut tree = tree_of(&[1, 2, 3]);
        let root = tree.root;
        tree.nodes[root].color = Color::Red;
        let err = tree.validate().unwrap_err();
        assert_eq!(err.code(), IndexErrorCode::RootNotBlack);
    }

    #[test]
    fn test_validate_detects_black_height_mismatch() {
        let mut tree = tree_of(&[2, 1, 3]);
        let left = tree.nodes[tree.root].left;
        tree.nodes[left].color = Color::Black;
        let err = tree.validate().unwrap_err();
        assert_eq!(err.code(), IndexErrorCode::BlackHeight);
    }
}
