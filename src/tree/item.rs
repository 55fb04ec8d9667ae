//! The stored element type.

use std::fmt;

/// An ordered key paired with an opaque payload.
///
/// Only `key` participates in ordering; `value` is carried along untouched.
/// Duplicate keys are allowed in the tree and keep their insertion order,
/// so two items may compare equal by key while holding different values.
///
/// # Example
/// ```
/// use ranktree::Item;
///
/// let item = Item::new(42, "answer");
/// assert_eq!(item.key, 42);
/// assert_eq!(item.value, "answer");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item<K, V> {
    /// The ordering key.
    pub key: K,
    /// The payload; the tree never inspects it except for exact-item deletion.
    pub value: V,
}

impl<K, V> Item<K, V> {
    /// Create a new key/value item.
    #[inline]
    pub fn new(key: K, value: V) -> Self {
        Item { key, value }
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for Item<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.value)
    }
}
