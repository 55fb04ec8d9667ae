//! Invariant verification for test harnesses.
//!
//! [`BTree::check`] walks the whole tree and *recomputes* everything the
//! operation path maintains incrementally: subtree counts, height, key
//! order, capacity bounds. It never mutates the tree and is not meant for
//! runtime use - a non-empty error list means the implementation has a
//! bug, not that the caller misused the API.

use std::fmt::Debug;

use crate::common::{Error, MinDegree, Result};
use crate::tree::node::Node;
use crate::tree::BTree;

/// Outcome of a consistency check.
///
/// Carries the independently recomputed size and height, the observed key
/// range, and one message per violated invariant.
#[derive(Debug, Clone)]
pub struct CheckReport<K> {
    /// Item count recomputed by full traversal.
    pub size: usize,
    /// Height recomputed by walking to the leaves.
    pub height: usize,
    /// One message per violated invariant; empty when the tree is sound.
    pub errors: Vec<String>,
    /// Smallest and largest keys seen, in traversal order. `None` for an
    /// empty tree.
    pub key_range: Option<(K, K)>,
}

impl<K> CheckReport<K> {
    /// True when no invariant was violated.
    pub fn is_consistent(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of violations found.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Convert into a `Result`, folding all violations into a single
    /// [`Error::InvariantViolation`]. The only producer of that variant.
    ///
    /// # Errors
    /// `Error::InvariantViolation` when any invariant was violated.
    pub fn into_result(self) -> Result<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(Error::InvariantViolation(self.errors.join("; ")))
        }
    }
}

impl<K: Ord + Clone + Debug, V> BTree<K, V> {
    /// Walk the tree and validate every structural invariant.
    ///
    /// Checks, per node: capacity bounds (the root is exempt from the
    /// minimum), children count = items + 1, cached `subtree_count`
    /// against a recount. Globally: uniform leaf depth, non-decreasing
    /// key order, and the cached size and height against recomputation.
    pub fn check(&self) -> CheckReport<K> {
        let mut walker = Walker {
            degree: self.min_degree(),
            errors: Vec::new(),
            size: 0,
            min: None,
            max: None,
        };

        let mut path = Vec::new();
        let (height, count) = walker.visit(self.root(), &mut path);

        if count != self.size() {
            walker.errors.push(format!(
                "tree size {} != recomputed count {}",
                self.size(),
                count
            ));
        }
        if height != self.height() {
            walker.errors.push(format!(
                "tree height {} != recomputed height {}",
                self.height(),
                height
            ));
        }

        CheckReport {
            size: walker.size,
            height,
            errors: walker.errors,
            key_range: walker.min.zip(walker.max),
        }
    }
}

struct Walker<K> {
    degree: MinDegree,
    errors: Vec<String>,
    size: usize,
    min: Option<K>,
    max: Option<K>,
}

impl<K: Ord + Clone + Debug> Walker<K> {
    /// Record one key in traversal order, tracking the running range.
    fn observe(&mut self, key: &K) {
        self.size += 1;
        match (&self.min, &self.max) {
            (None, _) => {
                self.min = Some(key.clone());
                self.max = Some(key.clone());
            }
            (Some(min), _) if key < min => {
                self.errors
                    .push(format!("key {:?} sorts before the minimum {:?}", key, min));
            }
            (_, Some(max)) if key < max => {
                self.errors.push(format!(
                    "key {:?} out of order after maximum {:?}",
                    key, max
                ));
            }
            (_, Some(max)) if key > max => self.max = Some(key.clone()),
            _ => {}
        }
    }

    /// Validate one node, returning its recomputed (height, item count).
    /// `path.is_empty()` identifies the root, which is exempt from the
    /// minimum-occupancy bound.
    fn visit<V>(&mut self, node: &Node<K, V>, path: &mut Vec<usize>) -> (usize, usize) {
        let item_count = node.items.len();

        if item_count > self.degree.max_items() {
            self.errors.push(format!(
                "node at {:?} holds {} items, max {}",
                path,
                item_count,
                self.degree.max_items()
            ));
        }
        if !path.is_empty() && item_count < self.degree.get() - 1 {
            self.errors.push(format!(
                "node at {:?} holds {} items, min {}",
                path,
                item_count,
                self.degree.get() - 1
            ));
        }

        if node.is_leaf() {
            for item in &node.items {
                self.observe(&item.key);
            }
            if node.subtree_count != item_count {
                self.errors.push(format!(
                    "leaf at {:?} caches count {}, recounted {}",
                    path, node.subtree_count, item_count
                ));
            }
            return (0, item_count);
        }

        if node.children.len() < 2 {
            self.errors
                .push(format!("internal node at {:?} has fewer than 2 children", path));
        }
        if node.children.len() != item_count + 1 {
            self.errors.push(format!(
                "node at {:?} has {} items but {} children",
                path,
                item_count,
                node.children.len()
            ));
        }
        if node.children.len() > self.degree.order() {
            self.errors.push(format!(
                "node at {:?} has {} children, max order {}",
                path,
                node.children.len(),
                self.degree.order()
            ));
        }

        // in-order: child 0, item 0, child 1, item 1, ...
        let mut count = item_count;
        let mut height = None;
        for (i, child) in node.children.iter().enumerate() {
            path.push(i);
            let (child_height, child_count) = self.visit(child, path);
            path.pop();
            count += child_count;

            match height {
                None => height = Some(child_height),
                Some(h) if h != child_height => {
                    self.errors.push(format!(
                        "leaf depth differs under child {} of {:?}: {} vs {}",
                        i, path, child_height, h
                    ));
                }
                _ => {}
            }

            if let Some(item) = node.items.get(i) {
                self.observe(&item.key);
            }
        }

        if node.subtree_count != count {
            self.errors.push(format!(
                "node at {:?} caches count {}, recounted {}",
                path, node.subtree_count, count
            ));
        }

        (height.unwrap_or(0) + 1, count)
    }
}
