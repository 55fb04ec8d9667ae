//! Error types for ranktree.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in ranktree.
///
/// "Key not found" is deliberately absent: a delete or search that matches
/// nothing is a normal outcome, reported as `None` or an empty `Vec`, never
/// as an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A rank passed to `get` lies outside `[0, size)`.
    #[error("rank {rank} out of range [0, {size})")]
    RankOutOfRange {
        /// The requested rank.
        rank: usize,
        /// Tree size at the time of the call.
        size: usize,
    },

    /// A slice request could not be satisfied: `start` is not a valid rank,
    /// or `step` is zero. Note that `stop` is *not* validated; an
    /// out-of-bounds `stop` merely clamps the iteration.
    #[error("slice [{start}:{stop}:{step}] out of range [0, {size})")]
    SliceOutOfRange {
        /// Requested start rank.
        start: usize,
        /// Requested stop rank (exclusive, may be negative for reverse slices).
        stop: isize,
        /// Requested step.
        step: isize,
        /// Tree size at the time of the call.
        size: usize,
    },

    /// The consistency checker found a broken invariant.
    ///
    /// This is only ever produced by [`crate::check`]; seeing it means the
    /// implementation has a bug, not that the caller did anything wrong.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_display() {
        let err = Error::RankOutOfRange { rank: 9, size: 4 };
        assert_eq!(format!("{}", err), "rank 9 out of range [0, 4)");
    }

    #[test]
    fn test_slice_display() {
        let err = Error::SliceOutOfRange {
            start: 5,
            stop: -1,
            step: -2,
            size: 3,
        };
        assert_eq!(format!("{}", err), "slice [5:-1:-2] out of range [0, 3)");
    }

    #[test]
    fn test_result_type_alias() {
        fn might_fail() -> Result<u32> {
            Ok(42)
        }

        assert_eq!(might_fail().unwrap(), 42);
    }
}
