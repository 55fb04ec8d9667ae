//! Configuration constants for ranktree.

/// Smallest legal minimum degree.
///
/// With `t = 2` every node holds 1..=3 items and an internal node has
/// 2..=4 children (a 2-3-4 tree). Anything below 2 cannot satisfy the
/// B-tree rebalancing rules: a split needs a median item plus one item
/// on each side.
pub const MIN_DEGREE_MIN: usize = 2;

/// Default minimum degree.
///
/// `t = 7` gives nodes of up to 13 items, a reasonable middle ground:
/// - shallow trees (a million items fit in a height-5 tree)
/// - node scans stay short enough that linear search beats binary
///   search on small keys
pub const MIN_DEGREE_DEFAULT: usize = 7;

/// Maximum number of items a node may hold for a given minimum degree.
#[inline]
pub const fn max_items(min_degree: usize) -> usize {
    2 * min_degree - 1
}
