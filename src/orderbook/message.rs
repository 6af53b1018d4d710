//! The preprocessed message union consumed by [`super::OrderBook`].
//!
//! Replaces the source feed's string-tag dispatch with a proper sum
//! type: once a `Message` exists, every variant already carries exactly
//! the fields its handler needs, so `OrderBook::process_message` itself
//! has nothing left to validate by tag. Tag validation happens one step
//! earlier, in [`super::OrderBook::decode_message`], which turns a raw
//! historical tag back into one of these variants and is where an
//! unrecognized tag becomes `InvalidMessageTag`.

/// One unit of book-mutating input, already resolved out of whatever
/// wire format the feed originally arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Message {
    AddAsk { ref_id: i64, price: i64, shares: u64 },
    AddBid { ref_id: i64, price: i64, shares: u64 },
    AddAskAgent { ref_id: i64, price: i64, shares: u64 },
    AddBidAgent { ref_id: i64, price: i64, shares: u64 },
    ExecuteAsk { ref_id: i64, shares: u64 },
    ExecuteBid { ref_id: i64, shares: u64 },
    MarketBuy { ref_id: i64, shares: u64 },
    MarketSell { ref_id: i64, shares: u64 },
    CancelAsk { ref_id: i64, shares: u64 },
    CancelBid { ref_id: i64, shares: u64 },
    DeleteAsk { ref_id: i64 },
    DeleteBid { ref_id: i64 },
    ReplaceAsk { ref_id: i64, new_ref: i64, price: i64, shares: u64 },
    ReplaceBid { ref_id: i64, new_ref: i64, price: i64, shares: u64 },
}
