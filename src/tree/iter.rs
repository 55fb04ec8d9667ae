//! Lazy ascending in-order iteration.

use std::iter::FusedIterator;

use crate::tree::node::Node;
use crate::tree::Item;

/// Ascending in-order iterator over a `BTree`.
///
/// Lazy and restartable: each call to `BTree::iter` starts a fresh walk.
/// The iterator keeps an explicit stack of `(node, next item index)`
/// frames instead of recursing, descending to the leftmost leaf between
/// items.
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    stack: Vec<(&'a Node<K, V>, usize)>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(root: &'a Node<K, V>) -> Self {
        let mut iter = Iter {
            stack: Vec::new(),
            remaining: root.subtree_count,
        };
        iter.descend_leftmost(root);
        iter
    }

    /// Push `node` and its chain of leftmost descendants onto the stack.
    fn descend_leftmost(&mut self, mut node: &'a Node<K, V>) {
        loop {
            self.stack.push((node, 0));
            match node.children.first() {
                Some(child) => node = child,
                None => break,
            }
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a Item<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            let node: &'a Node<K, V> = frame.0;
            if frame.1 >= node.items.len() {
                self.stack.pop();
                continue;
            }

            let index = frame.1;
            frame.1 += 1;

            let item = &node.items[index];
            // the right subtree of this item comes next
            if let Some(child) = node.children.get(index + 1) {
                self.descend_leftmost(child);
            }
            self.remaining -= 1;
            return Some(item);
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(keys: &[i32]) -> Node<i32, i32> {
        Node::from_parts(keys.iter().map(|&k| Item::new(k, k)).collect(), Vec::new())
    }

    #[test]
    fn test_empty() {
        let root: Node<i32, i32> = Node::new_leaf();
        assert_eq!(Iter::new(&root).next(), None);
        assert_eq!(Iter::new(&root).len(), 0);
    }

    #[test]
    fn test_in_order_walk() {
        let root = Node::from_parts(
            vec![Item::new(10, 10), Item::new(20, 20)],
            vec![leaf(&[1, 2]), leaf(&[11, 12]), leaf(&[21, 22])],
        );

        let keys: Vec<i32> = Iter::new(&root).map(|item| item.key).collect();
        assert_eq!(keys, vec![1, 2, 10, 11, 12, 20, 21, 22]);
    }

    #[test]
    fn test_exact_size() {
        let root = Node::from_parts(
            vec![Item::new(10, 10)],
            vec![leaf(&[1]), leaf(&[20, 21])],
        );

        let mut iter = Iter::new(&root);
        assert_eq!(iter.len(), 4);
        iter.next();
        assert_eq!(iter.len(), 3);
    }
}
