//! Minimum-degree parameter type.

use std::fmt;

use crate::common::config::{max_items, MIN_DEGREE_DEFAULT, MIN_DEGREE_MIN};

/// The branching-factor parameter `t` of a B-tree.
///
/// Every non-root node holds between `t - 1` and `2t - 1` items and, if
/// internal, between `t` and `2t` children. The constructor clamps values
/// below [`MIN_DEGREE_MIN`] instead of failing, matching the tolerant
/// behavior callers expect from a container constructor.
///
/// # Example
/// ```
/// use ranktree::MinDegree;
///
/// let t = MinDegree::new(4);
/// assert_eq!(t.get(), 4);
/// assert_eq!(t.max_items(), 7);
///
/// // values below the legal minimum are clamped, not rejected
/// assert_eq!(MinDegree::new(0).get(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MinDegree(usize);

impl MinDegree {
    /// Create a new MinDegree, clamping to [`MIN_DEGREE_MIN`].
    #[inline]
    pub fn new(t: usize) -> Self {
        MinDegree(t.max(MIN_DEGREE_MIN))
    }

    /// The raw `t` value.
    #[inline]
    pub fn get(&self) -> usize {
        self.0
    }

    /// Maximum items per node, `2t - 1`.
    #[inline]
    pub fn max_items(&self) -> usize {
        max_items(self.0)
    }

    /// The order `m = 2t`: maximum children per node.
    #[inline]
    pub fn order(&self) -> usize {
        2 * self.0
    }
}

impl Default for MinDegree {
    fn default() -> Self {
        MinDegree(MIN_DEGREE_DEFAULT)
    }
}

impl fmt::Display for MinDegree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={}", self.0)
    }
}
