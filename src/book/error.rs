//! Errors raised by a single half-book.

use thiserror::Error;

/// Failure modes of [`crate::book::HalfBook`] operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BookError {
    /// An incoming add re-used a ref already present in the pool.
    #[error("ref {0} already exists in this half-book")]
    PrimaryKeyConflict(i64),

    /// An execute targeting `ref_id` asked for more shares than were
    /// actually available once the order was reached.
    #[error("execute on ref {ref_id} requested {shares} shares but only {available} were available")]
    ExecutionExceedsAvailable {
        ref_id: i64,
        shares: u64,
        available: u64,
    },

    /// A replace referenced a source ref that is not resting in the book.
    #[error("replace has no source order for ref {0}")]
    ReplaceMissingSource(i64),

    /// The all-time count of distinct prices ever touched on this side
    /// exceeded the configured ceiling.
    #[error("volume ledger on this side holds {count} price levels, exceeding the limit of {limit}")]
    VolumeLevelExplosion { count: usize, limit: usize },
}
