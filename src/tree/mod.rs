//! The B-tree itself.
//!
//! Layered the way the algorithm recurses:
//! - [`Item`] - an ordered key paired with an opaque payload
//! - `Node` (private) - the recursive structure and all rebalancing logic
//! - [`Iter`] - lazy ascending in-order iteration
//! - [`BTree`] - the public façade owning the root

mod btree;
mod item;
mod iter;
pub(crate) mod node;

pub use btree::{BTree, Step};
pub use item::Item;
pub use iter::Iter;
