//! Common types and utilities shared across ranktree.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Configuration constants
//! - Error types
//! - The `MinDegree` branching-factor parameter

pub mod config;
pub mod error;
mod min_degree;

pub use error::{Error, Result};
pub use min_degree::MinDegree;
