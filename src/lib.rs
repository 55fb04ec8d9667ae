//! ranktree - An in-memory order-statistic B-tree with FIFO duplicate keys.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                           ranktree                              │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │               BTree façade (tree/btree.rs)               │   │
//! │  │  insert / search / delete / get(rank) / slice / iter /   │   │
//! │  │  traverse — bounds checks, root split & root collapse    │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Node algorithms (tree/node.rs)              │   │
//! │  │   split on overflow | borrow/merge on underflow |        │   │
//! │  │   predecessor/successor substitution | subtree counts    │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                                                                 │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │        Consistency checker (check.rs) [tests only]       │   │
//! │  │  recomputes counts/height/order, never on mutation path  │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (MinDegree, Error, config)
//! - [`tree`] - The B-tree itself: items, nodes, iterators, façade
//! - [`check`] - Invariant verification for test harnesses
//!
//! # Quick Start
//! ```
//! use ranktree::BTree;
//!
//! let mut tree = BTree::new();
//! tree.insert(3, "three");
//! tree.insert(1, "one");
//! tree.insert(3, "three again"); // duplicate keys are kept, FIFO order
//!
//! assert_eq!(tree.size(), 3);
//! assert_eq!(tree.search(&3).len(), 2);
//! assert_eq!(tree.get(0).unwrap().key, 1);
//! ```
//!
//! # Concurrency
//! `BTree` is single-threaded by design: no internal locking, no structural
//! sharing. Wrap it in external synchronization if multiple threads must
//! share one tree.

pub mod check;
pub mod common;
pub mod tree;

// Re-export commonly used items at crate root for convenience
pub use check::CheckReport;
pub use common::config::{MIN_DEGREE_DEFAULT, MIN_DEGREE_MIN};
pub use common::{Error, MinDegree, Result};
pub use tree::{BTree, Item, Iter, Step};
