//! B-tree node structure and rebalancing algorithms.
//!
//! Everything structural lives here: split on overflow, borrow/merge on
//! underflow, predecessor/successor substitution, and the cached subtree
//! counts that make rank access logarithmic. The [`Node`] type is crate
//! private; the public API goes through `BTree`.
//!
//! The minimum degree `t` is owned by the tree and threaded through every
//! call rather than stored per node.
//!
//! # Invariants
//! After every public tree operation completes:
//! - all leaves sit at the same depth
//! - every non-root node holds between `t - 1` and `2t - 1` items
//! - an internal node with `k` items has exactly `k + 1` children
//! - items are non-decreasing by key; equal-key runs keep insertion order
//! - `subtree_count` equals the items here plus all descendants' items

use crate::common::config::max_items;
use crate::tree::Item;

/// One node of the B-tree.
///
/// `children` is empty exactly when the node is a leaf. `subtree_count` is
/// maintained incrementally on every structural mutation and is never
/// recomputed by traversal on the operation path (the consistency checker
/// recomputes it independently).
#[derive(Debug, Clone)]
pub(crate) struct Node<K, V> {
    /// Items in ascending key order; equal keys in insertion (FIFO) order.
    pub(crate) items: Vec<Item<K, V>>,
    /// Child nodes; empty for a leaf, otherwise `items.len() + 1` entries.
    pub(crate) children: Vec<Node<K, V>>,
    /// Cached number of items in this whole subtree.
    pub(crate) subtree_count: usize,
}

impl<K, V> Default for Node<K, V> {
    fn default() -> Self {
        Node::new_leaf()
    }
}

impl<K, V> Node<K, V> {
    /// An empty leaf. Only the root of an empty tree stays in this state.
    pub(crate) fn new_leaf() -> Self {
        Node {
            items: Vec::new(),
            children: Vec::new(),
            subtree_count: 0,
        }
    }

    /// Assemble a node from parts, deriving `subtree_count` from the
    /// children's cached counts (no deep traversal).
    pub(crate) fn from_parts(items: Vec<Item<K, V>>, children: Vec<Node<K, V>>) -> Self {
        let subtree_count =
            items.len() + children.iter().map(|c| c.subtree_count).sum::<usize>();
        Node {
            items,
            children,
            subtree_count,
        }
    }

    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Over capacity: holds more than `2t - 1` items and must be split.
    #[inline]
    fn is_full(&self, t: usize) -> bool {
        self.items.len() > max_items(t)
    }

    /// Has an item to spare: a delete may take one without underflowing.
    #[inline]
    fn has_spare(&self, t: usize) -> bool {
        self.items.len() >= t
    }

    // ========================================================================
    // Rank access
    // ========================================================================

    /// The item at 0-based `rank` within this subtree.
    ///
    /// Walks children left to right, skipping whole subtrees by their cached
    /// counts. The caller must have validated `rank < subtree_count`.
    pub(crate) fn item_at(&self, mut rank: usize) -> &Item<K, V> {
        for (i, child) in self.children.iter().enumerate() {
            if rank < child.subtree_count {
                return child.item_at(rank);
            }
            rank -= child.subtree_count;
            if rank == 0 {
                return &self.items[i];
            }
            rank -= 1; // account for the separator we just passed
        }

        // leaf: the remaining rank indexes items directly
        &self.items[rank]
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Append every item with key equal to `key` to `out`, in ascending
    /// tree order (== FIFO insertion order for equal keys).
    pub(crate) fn search<'a>(&'a self, key: &K, out: &mut Vec<&'a Item<K, V>>)
    where
        K: Ord,
    {
        for (i, item) in self.items.iter().enumerate() {
            // keys to the left of this item are all smaller, skip the child
            if item.key < *key {
                continue;
            }

            // duplicates may sit in the child even when this key is bigger
            if let Some(child) = self.children.get(i) {
                child.search(key, out);
            }

            if item.key > *key {
                return; // no match can occur further right
            }

            out.push(item);
        }

        // every item was <= key: the last child may still hold matches
        if let Some(last) = self.children.last() {
            last.search(key, out);
        }
    }

    // ========================================================================
    // Insert / split
    // ========================================================================

    /// Insert `item`, keeping new duplicates to the right of existing equal
    /// keys (FIFO). Returns true when this node now exceeds `2t - 1` items
    /// and the caller must split it.
    pub(crate) fn insert(&mut self, item: Item<K, V>, t: usize) -> bool
    where
        K: Ord,
    {
        // first position whose key is strictly greater than the new key
        let mut i = 0;
        while i < self.items.len() && self.items[i].key <= item.key {
            i += 1;
        }

        // insertion always succeeds, so count optimistically on the way down
        self.subtree_count += 1;

        if self.is_leaf() {
            self.items.insert(i, item);
            return self.is_full(t);
        }

        if self.children[i].insert(item, t) {
            let (median, right) = self.children[i].split(t);
            self.items.insert(i, median);
            self.children.insert(i + 1, right);
            return self.is_full(t);
        }

        false
    }

    /// Split an overfull node (2t items) in half.
    ///
    /// The right half (`items[t..]`, `children[t..]`) moves into a new
    /// sibling; the item at index `t - 1` pops out as the median. Both
    /// halves satisfy the capacity invariant afterwards.
    pub(crate) fn split(&mut self, t: usize) -> (Item<K, V>, Node<K, V>) {
        let right_items = self.items.split_off(t);
        let right_children = if self.is_leaf() {
            Vec::new()
        } else {
            self.children.split_off(t)
        };
        let right = Node::from_parts(right_items, right_children);

        self.subtree_count -= right.subtree_count + 1;
        let median = self
            .items
            .pop()
            .expect("an overfull node keeps t items on the left of a split");
        (median, right)
    }

    // ========================================================================
    // Delete / rebalance
    // ========================================================================

    /// Merge `children[index + 1]` into `children[index]`, pulling the
    /// separator item at `index` down between them. The right sibling is
    /// consumed. Our own `subtree_count` is unchanged: the separator moves
    /// down, it does not leave the subtree.
    fn merge(&mut self, index: usize) {
        let separator = self.items.remove(index);
        let right = self.children.remove(index + 1);
        let left = &mut self.children[index];

        left.subtree_count += right.subtree_count + 1;
        left.items.push(separator);
        left.items.extend(right.items);
        left.children.extend(right.children);
    }

    /// Make sure `children[index]` can lose an item without underflowing,
    /// rebalancing proactively *before* the delete descends into it.
    ///
    /// Preference order: borrow from the left sibling, borrow from the
    /// right sibling, merge with a sibling. Returns the index of the
    /// effective child afterwards - merging the last child folds it into
    /// its left sibling, shifting the index down by one.
    fn ensure_child_capacity(&mut self, index: usize, t: usize) -> usize {
        if self.children[index].has_spare(t) {
            return index;
        }

        if index > 0 && self.children[index - 1].has_spare(t) {
            // rotate right: separator moves down to the child's front,
            // the left sibling's last item moves up to replace it
            let (head, tail) = self.children.split_at_mut(index);
            let left = &mut head[index - 1];
            let child = &mut tail[0];

            let lent = left
                .items
                .pop()
                .expect("a sibling with spare items is non-empty");
            let separator = std::mem::replace(&mut self.items[index - 1], lent);
            child.items.insert(0, separator);

            if let Some(subtree) = left.children.pop() {
                left.subtree_count -= subtree.subtree_count;
                child.subtree_count += subtree.subtree_count;
                child.children.insert(0, subtree);
            }
            left.subtree_count -= 1;
            child.subtree_count += 1;
            index
        } else if index < self.items.len() {
            if self.children[index + 1].has_spare(t) {
                // rotate left, mirror of the branch above
                let (head, tail) = self.children.split_at_mut(index + 1);
                let child = &mut head[index];
                let right = &mut tail[0];

                let lent = right.items.remove(0);
                let separator = std::mem::replace(&mut self.items[index], lent);
                child.items.push(separator);

                if !right.children.is_empty() {
                    let subtree = right.children.remove(0);
                    right.subtree_count -= subtree.subtree_count;
                    child.subtree_count += subtree.subtree_count;
                    child.children.push(subtree);
                }
                right.subtree_count -= 1;
                child.subtree_count += 1;
                index
            } else {
                self.merge(index);
                index
            }
        } else {
            // last child with no spare sibling on either side: fold it into
            // its left sibling (min_degree >= 2 guarantees one exists)
            self.merge(index - 1);
            index - 1
        }
    }

    /// Remove the in-order last item of this subtree, rebalancing on the
    /// way down. The caller guarantees the subtree can spare an item.
    fn remove_rightmost(&mut self, t: usize) -> Item<K, V> {
        self.subtree_count -= 1;
        if self.is_leaf() {
            return self
                .items
                .pop()
                .expect("removal never descends into an empty subtree");
        }
        let i = self.ensure_child_capacity(self.items.len(), t);
        self.children[i].remove_rightmost(t)
    }

    /// Remove the in-order first item of this subtree, mirror of
    /// [`Node::remove_rightmost`].
    fn remove_leftmost(&mut self, t: usize) -> Item<K, V> {
        self.subtree_count -= 1;
        if self.is_leaf() {
            return self.items.remove(0);
        }
        let i = self.ensure_child_capacity(0, t);
        self.children[i].remove_leftmost(t)
    }

    /// Remove `items[index]` from an internal node by substitution.
    ///
    /// Replaces it with the in-order predecessor (if the left child can
    /// spare an item) or successor (right child), pulling that neighbor up
    /// through a recursive removal. When neither child can spare one, the
    /// two children merge around the separator and the delete recurses
    /// into the merged child, where the separator now lives.
    fn remove_internal_item<F>(
        &mut self,
        index: usize,
        key: &K,
        matches: &mut F,
        t: usize,
    ) -> Item<K, V>
    where
        K: Ord,
        F: FnMut(&Item<K, V>) -> bool,
    {
        if self.children[index].has_spare(t) {
            let predecessor = self.children[index].remove_rightmost(t);
            std::mem::replace(&mut self.items[index], predecessor)
        } else if self.children[index + 1].has_spare(t) {
            let successor = self.children[index + 1].remove_leftmost(t);
            std::mem::replace(&mut self.items[index], successor)
        } else {
            self.merge(index);
            self.children[index]
                .delete_by(key, matches, t)
                .expect("the separator moved into the merged child")
        }
    }

    /// Remove and return the first item accepted by `matches`, scanning in
    /// ascending order. `key` drives navigation; `matches` decides the
    /// final hit (key-only or exact key+value). Returns `None` when no
    /// item matches - the normal NotFound outcome.
    ///
    /// Underflow is repaired *before* every descent via
    /// [`Node::ensure_child_capacity`], so a child can always afford to
    /// lose an item by the time the recursion reaches it.
    pub(crate) fn delete_by<F>(&mut self, key: &K, matches: &mut F, t: usize) -> Option<Item<K, V>>
    where
        K: Ord,
        F: FnMut(&Item<K, V>) -> bool,
    {
        if self.is_leaf() {
            let mut pos = None;
            for (i, item) in self.items.iter().enumerate() {
                if matches(item) {
                    pos = Some(i);
                    break;
                }
            }
            let pos = pos?;
            self.subtree_count -= 1;
            return Some(self.items.remove(pos));
        }

        let mut i = 0;
        while i < self.items.len() {
            if self.items[i].key < *key {
                i += 1;
                continue;
            }

            // items[i].key >= key: the first match, if any, is either in
            // children[i] or is items[i] itself
            let child = self.ensure_child_capacity(i, t);
            if let Some(found) = self.children[child].delete_by(key, matches, t) {
                self.subtree_count -= 1;
                return Some(found);
            }

            // A merge in ensure_child_capacity consumes the separator at i,
            // and the recursion above has already searched the merged child.
            // Whatever shifted into position i is examined next without a
            // second descent; if the merged child was the rightmost subtree,
            // the scan is done.
            if i >= self.items.len() {
                return None;
            }

            if matches(&self.items[i]) {
                self.subtree_count -= 1;
                return Some(self.remove_internal_item(i, key, matches, t));
            }

            if self.items[i].key > *key {
                return None; // no match can occur further right
            }
            i += 1;
        }

        // every item was <= key: only the last child remains
        let child = self.ensure_child_capacity(self.items.len(), t);
        let found = self.children[child].delete_by(key, matches, t)?;
        self.subtree_count -= 1;
        Some(found)
    }

    /// Remove the item at 0-based `rank` within this subtree, rebalancing
    /// on the way down like a keyed delete. The caller must have validated
    /// `rank < subtree_count`.
    ///
    /// Navigation is purely count-driven, so no key comparisons happen and
    /// no `Ord` bound is needed. When the rank lands on a separator of an
    /// internal node it is substituted with its in-order predecessor or
    /// successor; when neither child can spare one, the children merge and
    /// the separator is removed from the merged child at a known offset.
    pub(crate) fn remove_at(&mut self, rank: usize, t: usize) -> Item<K, V> {
        self.subtree_count -= 1;
        if self.is_leaf() {
            return self.items.remove(rank);
        }

        // rebalancing shifts items between siblings and separators, so the
        // scan restarts from the original rank after repairing a child
        'rescan: loop {
            let mut r = rank;
            for i in 0..self.children.len() {
                let count = self.children[i].subtree_count;
                if r < count {
                    if !self.children[i].has_spare(t) {
                        self.ensure_child_capacity(i, t);
                        continue 'rescan;
                    }
                    return self.children[i].remove_at(r, t);
                }
                r -= count;

                if r == 0 {
                    // the rank is the separator itself
                    return if self.children[i].has_spare(t) {
                        let predecessor = self.children[i].remove_rightmost(t);
                        std::mem::replace(&mut self.items[i], predecessor)
                    } else if self.children[i + 1].has_spare(t) {
                        let successor = self.children[i + 1].remove_leftmost(t);
                        std::mem::replace(&mut self.items[i], successor)
                    } else {
                        let offset = self.children[i].subtree_count;
                        self.merge(i);
                        self.children[i].remove_at(offset, t)
                    };
                }
                r -= 1; // account for the separator we just passed
            }
            unreachable!("rank is validated against subtree_count by the caller");
        }
    }

    // ========================================================================
    // Traversal
    // ========================================================================

    /// In-order walk with an explicit continue/stop signal.
    ///
    /// `path` holds the child indices from the root down to the current
    /// node; the item's own index is pushed for the callback and popped
    /// right after, so the last path element is the item's slot.
    pub(crate) fn traverse<'a, R, F>(&'a self, path: &mut Vec<usize>, f: &mut F) -> Option<R>
    where
        F: FnMut(&[usize], &'a Item<K, V>) -> crate::tree::Step<R>,
    {
        use crate::tree::Step;

        if self.is_leaf() {
            for (i, item) in self.items.iter().enumerate() {
                path.push(i);
                let step = f(path, item);
                path.pop();
                if let Step::Stop(result) = step {
                    return Some(result);
                }
            }
            return None;
        }

        for (i, child) in self.children.iter().enumerate() {
            path.push(i);
            let result = child.traverse(path, f);
            path.pop();
            if result.is_some() {
                return result;
            }

            if i < self.items.len() {
                path.push(i);
                let step = f(path, &self.items[i]);
                path.pop();
                if let Step::Stop(result) = step {
                    return Some(result);
                }
            }
        }
        None
    }

    /// Total number of nodes in this subtree, including this one.
    /// Full traversal; diagnostics only.
    pub(crate) fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }
}
