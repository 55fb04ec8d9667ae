//! The public B-tree façade.
//!
//! `BTree` owns the root node, tracks the tree height, and translates
//! root-level overflow and underflow into height changes. Everything
//! algorithmic happens in `node.rs`; this layer adds bounds validation
//! and the root split/collapse bookkeeping.

use crate::common::{Error, MinDegree, Result};
use crate::tree::node::Node;
use crate::tree::{Item, Iter};

/// Signal returned by a [`BTree::traverse`] callback: keep walking, or
/// stop immediately and hand `Stop`'s payload back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<R> {
    /// Continue the in-order walk.
    Continue,
    /// Stop the walk; `traverse` returns `Some` of the payload.
    Stop(R),
}

/// An in-memory, height-balanced, multi-way ordered container.
///
/// Supports logarithmic search, insertion and deletion, duplicate keys
/// with FIFO ordering among equals, and order-statistic access: `get` by
/// rank, `slice`, and ascending iteration, all driven by cached subtree
/// counts rather than linear scans.
///
/// Single-threaded by design: no internal locking, no structural sharing.
///
/// # Example
/// ```
/// use ranktree::BTree;
///
/// let mut tree = BTree::with_min_degree(2);
/// for key in [5, 3, 8, 3, 1] {
///     tree.insert(key, key * 10);
/// }
///
/// assert_eq!(tree.size(), 5);
/// assert_eq!(tree.search(&3).len(), 2);
/// assert_eq!(tree.get(0).unwrap().key, 1);
/// assert_eq!(tree.delete(&8).unwrap().value, 80);
/// assert_eq!(tree.delete(&8), None); // NotFound is a normal outcome
/// ```
#[derive(Debug, Clone)]
pub struct BTree<K, V> {
    root: Node<K, V>,
    height: usize,
    min_degree: MinDegree,
}

impl<K, V> Default for BTree<K, V> {
    fn default() -> Self {
        BTree::new()
    }
}

impl<K, V> BTree<K, V> {
    /// Create an empty tree with the default minimum degree (7).
    pub fn new() -> Self {
        Self::with_degree(MinDegree::default())
    }

    /// Create an empty tree with minimum degree `t`, clamped up to 2.
    pub fn with_min_degree(t: usize) -> Self {
        Self::with_degree(MinDegree::new(t))
    }

    /// Create an empty tree from an already-validated [`MinDegree`].
    pub fn with_degree(min_degree: MinDegree) -> Self {
        BTree {
            root: Node::new_leaf(),
            height: 0,
            min_degree,
        }
    }

    /// Total number of items, duplicates included.
    #[inline]
    pub fn size(&self) -> usize {
        self.root.subtree_count
    }

    /// True when the tree holds no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Number of child levels below the root: 0 for a leaf root.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// The branching-factor parameter this tree was built with.
    #[inline]
    pub fn min_degree(&self) -> MinDegree {
        self.min_degree
    }

    /// Total number of nodes, root included. Full traversal; meant for
    /// diagnostics, not the hot path.
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    pub(crate) fn root(&self) -> &Node<K, V> {
        &self.root
    }

    // ========================================================================
    // Rank access
    // ========================================================================

    /// The item at 0-based `rank` in ascending order.
    ///
    /// # Errors
    /// `Error::RankOutOfRange` if `rank >= size()`.
    pub fn get(&self, rank: usize) -> Result<&Item<K, V>> {
        if rank >= self.size() {
            return Err(Error::RankOutOfRange {
                rank,
                size: self.size(),
            });
        }
        Ok(self.root.item_at(rank))
    }

    /// Items at ranks `start, start + step, start + 2*step, ...` while the
    /// rank stays short of `stop` (`step > 0`) or above it (`step < 0`).
    ///
    /// `tree.slice(0, tree.size() as isize, 1)` is the full ascending
    /// sequence; a negative `step` walks backwards, with `stop = -1`
    /// reaching rank 0.
    ///
    /// `start` must be a valid rank. `stop` is deliberately *not*
    /// validated: a `stop` beyond either end merely clamps the iteration.
    /// The asymmetry matches conventional sequence-slicing tolerance.
    ///
    /// # Errors
    /// `Error::SliceOutOfRange` if `start >= size()` or `step == 0`.
    pub fn slice(&self, start: usize, stop: isize, step: isize) -> Result<Vec<&Item<K, V>>> {
        let size = self.size();
        if step == 0 || start >= size {
            return Err(Error::SliceOutOfRange {
                start,
                stop,
                step,
                size,
            });
        }

        let mut out = Vec::new();
        let mut rank = start as isize;
        if step > 0 {
            let limit = stop.min(size as isize);
            while rank < limit {
                out.push(self.root.item_at(rank as usize));
                rank += step;
            }
        } else {
            while rank > stop && rank >= 0 {
                out.push(self.root.item_at(rank as usize));
                rank += step;
            }
        }
        Ok(out)
    }

    /// Lazy ascending iterator over all items. Restartable: every call
    /// begins a fresh walk.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.root)
    }

    /// In-order walk with early termination.
    ///
    /// The callback receives the path of child indices from the root (the
    /// last element is the item's slot in its node) and the item. Returning
    /// [`Step::Stop`] ends the walk immediately and `traverse` returns its
    /// payload; a completed walk returns `None`.
    ///
    /// ```
    /// use ranktree::{BTree, Step};
    ///
    /// let mut tree = BTree::new();
    /// for key in 0..10 {
    ///     tree.insert(key, ());
    /// }
    ///
    /// // find the first key over 6 without walking the rest
    /// let hit = tree.traverse(|_path, item| {
    ///     if item.key > 6 {
    ///         Step::Stop(item.key)
    ///     } else {
    ///         Step::Continue
    ///     }
    /// });
    /// assert_eq!(hit, Some(7));
    /// ```
    pub fn traverse<'a, R, F>(&'a self, mut f: F) -> Option<R>
    where
        F: FnMut(&[usize], &'a Item<K, V>) -> Step<R>,
    {
        let mut path = Vec::new();
        self.root.traverse(&mut path, &mut f)
    }
}

impl<K: Ord, V> BTree<K, V> {
    // ========================================================================
    // Mutation
    // ========================================================================

    /// Insert a key/value pair.
    ///
    /// Duplicate keys are kept; a new duplicate goes after all existing
    /// items with an equal key, so equal-key runs read back in insertion
    /// order.
    pub fn insert(&mut self, key: K, value: V) {
        self.insert_item(Item::new(key, value));
    }

    /// Insert an already-built [`Item`].
    pub fn insert_item(&mut self, item: Item<K, V>) {
        let t = self.min_degree.get();
        if self.root.insert(item, t) {
            // overflow reached the top: split the root and grow a level
            let (median, right) = self.root.split(t);
            let old_root = std::mem::take(&mut self.root);
            self.root = Node::from_parts(vec![median], vec![old_root, right]);
            self.height += 1;
        }
    }

    /// All items with key equal to `key`, in ascending tree order - which
    /// for equal keys is their insertion (FIFO) order. Empty when none
    /// match.
    pub fn search(&self, key: &K) -> Vec<&Item<K, V>> {
        let mut out = Vec::new();
        self.root.search(key, &mut out);
        out
    }

    /// Remove and return the first (FIFO-oldest) item with key equal to
    /// `key`, or `None` when the key is absent. `None` is the normal
    /// NotFound outcome, not an error.
    pub fn delete(&mut self, key: &K) -> Option<Item<K, V>> {
        let t = self.min_degree.get();
        let removed = self
            .root
            .delete_by(key, &mut |item: &Item<K, V>| item.key == *key, t);
        self.collapse_root();
        removed
    }

    /// Remove and return the item matching `target` exactly, by key *and*
    /// value, disambiguating among duplicates. `None` when no such item
    /// exists.
    pub fn delete_item(&mut self, target: &Item<K, V>) -> Option<Item<K, V>>
    where
        V: PartialEq,
    {
        let t = self.min_degree.get();
        let removed = self.root.delete_by(
            &target.key,
            &mut |item: &Item<K, V>| item.key == target.key && item.value == target.value,
            t,
        );
        self.collapse_root();
        removed
    }

    /// Remove every item with key equal to `key`, returning them in
    /// removal order (== FIFO insertion order). Empty when none match.
    pub fn delete_all(&mut self, key: &K) -> Vec<Item<K, V>> {
        let mut removed = Vec::new();
        while let Some(item) = self.delete(key) {
            removed.push(item);
        }
        removed
    }

    /// Remove and return the item at 0-based `rank` in ascending order,
    /// picking one exact item even among equal-key duplicates.
    ///
    /// # Errors
    /// `Error::RankOutOfRange` if `rank >= size()`.
    pub fn delete_at(&mut self, rank: usize) -> Result<Item<K, V>> {
        if rank >= self.size() {
            return Err(Error::RankOutOfRange {
                rank,
                size: self.size(),
            });
        }
        let removed = self.root.remove_at(rank, self.min_degree.get());
        self.collapse_root();
        Ok(removed)
    }

    /// Replace an emptied internal root with its sole child.
    ///
    /// Checked after every delete, even an unsuccessful one: a failed
    /// descent can still merge the root's last two children. At most one
    /// collapse can happen per call.
    fn collapse_root(&mut self) {
        if self.root.items.is_empty() && !self.root.children.is_empty() {
            let child = self
                .root
                .children
                .pop()
                .expect("an empty internal root has exactly one child");
            self.root = child;
            self.height -= 1;
        }
    }
}

#[cfg(test)]
impl<K, V> BTree<K, V> {
    /// Test-only: adopt a hand-built root without validating it, so the
    /// consistency checker can be pointed at deliberately broken trees.
    pub(crate) fn from_raw(root: Node<K, V>, height: usize, t: usize) -> Self {
        BTree {
            root,
            height,
            min_degree: MinDegree::new(t),
        }
    }
}

impl<K: Ord, V> Extend<(K, V)> for BTree<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, pairs: I) {
        for (key, value) in pairs {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for BTree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(pairs: I) -> Self {
        let mut tree = BTree::new();
        tree.extend(pairs);
        tree
    }
}

impl<'a, K, V> IntoIterator for &'a BTree<K, V> {
    type Item = &'a Item<K, V>;
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_with_keys(t: usize, keys: impl IntoIterator<Item = i32>) -> BTree<i32, String> {
        let mut tree = BTree::with_min_degree(t);
        for key in keys {
            tree.insert(key, key.to_string());
        }
        tree
    }

    #[test]
    fn test_empty_tree() {
        let tree: BTree<i32, ()> = BTree::new();
        assert_eq!(tree.size(), 0);
        assert_eq!(tree.height(), 0);
        assert!(tree.is_empty());
        assert!(tree.search(&1).is_empty());
        assert_eq!(tree.iter().next(), None);
        assert_eq!(tree.node_count(), 1);
    }

    #[test]
    fn test_delete_on_empty_is_not_found() {
        let mut tree: BTree<i32, ()> = BTree::new();
        assert_eq!(tree.delete(&1), None);
        assert!(tree.delete_all(&1).is_empty());
    }

    #[test]
    fn test_root_split_grows_height() {
        // t = 2: the fourth insert overflows the root leaf
        let tree = tree_with_keys(2, 0..4);
        assert_eq!(tree.height(), 1);
        assert_eq!(tree.size(), 4);
    }

    #[test]
    fn test_root_collapse_shrinks_height() {
        let mut tree = tree_with_keys(2, 0..4);
        assert_eq!(tree.height(), 1);
        for key in 0..4 {
            assert!(tree.delete(&key).is_some());
        }
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.size(), 0);
    }

    #[test]
    fn test_get_out_of_range() {
        let tree = tree_with_keys(2, 0..3);
        assert!(tree.get(2).is_ok());
        assert_eq!(
            tree.get(3),
            Err(Error::RankOutOfRange { rank: 3, size: 3 })
        );
    }

    #[test]
    fn test_get_matches_traversal_order() {
        let tree = tree_with_keys(2, [9, 2, 7, 4, 0, 8, 1]);
        let in_order: Vec<i32> = tree.iter().map(|item| item.key).collect();
        assert_eq!(in_order, vec![0, 1, 2, 4, 7, 8, 9]);
        for (rank, &key) in in_order.iter().enumerate() {
            assert_eq!(tree.get(rank).unwrap().key, key);
        }
    }

    #[test]
    fn test_slice_forward() {
        let tree = tree_with_keys(2, 0..10);
        let keys: Vec<i32> = tree
            .slice(2, 8, 2)
            .unwrap()
            .iter()
            .map(|item| item.key)
            .collect();
        assert_eq!(keys, vec![2, 4, 6]);
    }

    #[test]
    fn test_slice_reverse_reaches_rank_zero() {
        let tree = tree_with_keys(2, 0..5);
        let keys: Vec<i32> = tree
            .slice(4, -1, -1)
            .unwrap()
            .iter()
            .map(|item| item.key)
            .collect();
        assert_eq!(keys, vec![4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_slice_stop_is_clamped_not_validated() {
        let tree = tree_with_keys(2, 0..5);
        // stop far beyond the end: legal, clamped to size
        let keys: Vec<i32> = tree
            .slice(3, 100, 1)
            .unwrap()
            .iter()
            .map(|item| item.key)
            .collect();
        assert_eq!(keys, vec![3, 4]);

        // stop on the wrong side of start: legal, empty
        assert!(tree.slice(3, 1, 1).unwrap().is_empty());
    }

    #[test]
    fn test_slice_start_and_step_are_validated() {
        let tree = tree_with_keys(2, 0..5);
        assert!(matches!(
            tree.slice(5, 10, 1),
            Err(Error::SliceOutOfRange { start: 5, .. })
        ));
        assert!(matches!(
            tree.slice(0, 5, 0),
            Err(Error::SliceOutOfRange { step: 0, .. })
        ));
    }

    #[test]
    fn test_traverse_paths_and_order() {
        let tree = tree_with_keys(2, 0..7);
        let mut seen = Vec::new();
        let result: Option<()> = tree.traverse(|path, item| {
            assert!(!path.is_empty());
            seen.push(item.key);
            Step::Continue
        });
        assert_eq!(result, None);
        assert_eq!(seen, (0..7).collect::<Vec<_>>());
    }

    #[test]
    fn test_traverse_early_stop() {
        let tree = tree_with_keys(2, 0..20);
        let mut visited = 0;
        let hit = tree.traverse(|_path, item| {
            visited += 1;
            if item.key == 5 {
                Step::Stop(item.value.clone())
            } else {
                Step::Continue
            }
        });
        assert_eq!(hit.as_deref(), Some("5"));
        assert_eq!(visited, 6);
    }

    #[test]
    fn test_duplicates_fifo_and_exact_delete() {
        let mut tree: BTree<i32, usize> = BTree::with_min_degree(2);
        for value in 0..8 {
            tree.insert(42, value);
        }

        let values: Vec<usize> = tree.search(&42).iter().map(|item| item.value).collect();
        assert_eq!(values, vec![0, 1, 2, 3, 4, 5, 6, 7]);

        // delete the 4th duplicate specifically
        let fourth = tree.search(&42)[3].clone();
        let removed = tree.delete_item(&fourth).unwrap();
        assert_eq!(removed.value, 3);

        let values: Vec<usize> = tree.search(&42).iter().map(|item| item.value).collect();
        assert_eq!(values, vec![0, 1, 2, 4, 5, 6, 7]);
    }

    #[test]
    fn test_delete_all_in_fifo_order() {
        let mut tree: BTree<i32, usize> = BTree::with_min_degree(2);
        for key in 0..10 {
            tree.insert(key, 100);
        }
        for value in 0..5 {
            tree.insert(7, value);
        }

        let removed: Vec<usize> = tree
            .delete_all(&7)
            .into_iter()
            .map(|item| item.value)
            .collect();
        assert_eq!(removed, vec![100, 0, 1, 2, 3, 4]);
        assert!(tree.search(&7).is_empty());
        assert_eq!(tree.size(), 9);
    }

    #[test]
    fn test_delete_at_removes_the_ranked_item() {
        let mut tree = tree_with_keys(2, 0..20);

        let removed = tree.delete_at(10).unwrap();
        assert_eq!(removed.key, 10);
        assert_eq!(tree.size(), 19);
        // everything above the hole shifts down one rank
        assert_eq!(tree.get(10).unwrap().key, 11);

        assert_eq!(
            tree.delete_at(19),
            Err(Error::RankOutOfRange { rank: 19, size: 19 })
        );
    }

    #[test]
    fn test_delete_at_picks_one_exact_duplicate() {
        let mut tree: BTree<i32, usize> = BTree::with_min_degree(2);
        for value in 0..8 {
            tree.insert(42, value);
        }

        let removed = tree.delete_at(3).unwrap();
        assert_eq!((removed.key, removed.value), (42, 3));

        let values: Vec<usize> = tree.search(&42).iter().map(|item| item.value).collect();
        assert_eq!(values, vec![0, 1, 2, 4, 5, 6, 7]);
    }

    #[test]
    fn test_delete_at_drains_to_empty_from_the_middle() {
        let mut tree = tree_with_keys(2, 0..50);
        while !tree.is_empty() {
            let rank = tree.size() / 2;
            let expected = tree.get(rank).unwrap().key;
            assert_eq!(tree.delete_at(rank).unwrap().key, expected);
            assert!(tree.check().is_consistent());
        }
        assert_eq!(tree.height(), 0);
        assert!(tree.delete_at(0).is_err());
    }

    #[test]
    fn test_extend_and_from_iterator() {
        let tree: BTree<i32, i32> = (0..5).map(|k| (k, k * k)).collect();
        assert_eq!(tree.size(), 5);

        let squares: Vec<i32> = (&tree).into_iter().map(|item| item.value).collect();
        assert_eq!(squares, vec![0, 1, 4, 9, 16]);
    }

    #[test]
    fn test_min_degree_is_clamped() {
        let tree: BTree<i32, ()> = BTree::with_min_degree(0);
        assert_eq!(tree.min_degree().get(), 2);
    }
}
