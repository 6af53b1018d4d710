//! Errors raised while driving the matched book.

use thiserror::Error;

use crate::book::BookError;

/// Failure modes of [`super::OrderBook::process_message`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OrderBookError {
    /// Error bubbled up from one of the two half-books.
    #[error("ask side error: {0}")]
    Ask(#[source] BookError),

    /// Error bubbled up from one of the two half-books.
    #[error("bid side error: {0}")]
    Bid(#[source] BookError),

    /// Raised by [`super::OrderBook::decode_message`]: either the tag
    /// itself is unrecognized, or a side-specific tag (execute, cancel,
    /// delete, replace) names a ref resting on neither half-book.
    #[error("invalid message tag {tag:?} for ref {ref_id}")]
    InvalidMessageTag { tag: String, ref_id: i64 },
}

impl OrderBookError {
    pub fn ask(err: BookError) -> Self {
        Self::Ask(err)
    }

    pub fn bid(err: BookError) -> Self {
        Self::Bid(err)
    }
}
