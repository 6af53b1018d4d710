//! The matched book: an ask half-book and a bid half-book that share a
//! single touch.

use tracing::{debug, trace};

use crate::book::{Fill, HalfBook, Side};

use super::error::OrderBookError;
use super::message::Message;

/// Outcome of a single message: the buy/sell direction flag half-book
/// execution reports (`None` when nothing crossed), and any fills
/// produced for agent-held legs of a trade.
pub type Outcome = (Option<bool>, Vec<Fill>);

/// Price-time-priority limit order book: an ask side and a bid side
/// that never allow a resting order on one to outprice the other's
/// touch. Any add that would cross the spread is converted into an
/// execution against the resting side instead of being booked.
pub struct OrderBook {
    ask_book: HalfBook,
    bid_book: HalfBook,
}

impl OrderBook {
    pub fn new(max_volume_levels: usize) -> Self {
        Self {
            ask_book: HalfBook::new(Side::Ask, max_volume_levels),
            bid_book: HalfBook::new(Side::Bid, max_volume_levels),
        }
    }

    pub fn best_ask(&self) -> i64 {
        self.ask_book.best_quote()
    }

    pub fn best_bid(&self) -> i64 {
        self.bid_book.best_quote()
    }

    /// `best_ask - best_bid`. Meaningless (and possibly negative) before
    /// both sides have ever held an order; callers should check
    /// `spread_is_valid` first if that matters to them.
    pub fn spread(&self) -> i64 {
        self.best_ask() - self.best_bid()
    }

    pub fn mid_price(&self) -> f64 {
        (self.best_ask() + self.best_bid()) as f64 / 2.0
    }

    pub fn ask_quote_volume(&self) -> i64 {
        self.ask_book.quote_volume()
    }

    pub fn bid_quote_volume(&self) -> i64 {
        self.bid_book.quote_volume()
    }

    /// Price at the given 0-indexed depth among live real ask levels,
    /// used by the router to anchor quotes to real liquidity.
    pub fn real_ask_price(&self, depth: usize) -> i64 {
        self.ask_book.real_price_at_depth(depth)
    }

    pub fn real_bid_price(&self, depth: usize) -> i64 {
        self.bid_book.real_price_at_depth(depth)
    }

    fn add_bid(&mut self, ref_id: i64, price: i64, shares: u64, real: bool) -> Result<Outcome, OrderBookError> {
        if price < self.ask_book.best_quote() {
            trace!(ref_id, price, shares, real, "resting bid");
            self.bid_book
                .add_order(ref_id, price, shares, real)
                .map_err(OrderBookError::bid)?;
            Ok((None, Vec::new()))
        } else {
            debug!(ref_id, price, shares, "bid crosses spread, executing against asks");
            self.ask_book.execute_market(ref_id, shares, true).map_err(OrderBookError::ask)
        }
    }

    fn add_ask(&mut self, ref_id: i64, price: i64, shares: u64, real: bool) -> Result<Outcome, OrderBookError> {
        if price > self.bid_book.best_quote() {
            trace!(ref_id, price, shares, real, "resting ask");
            self.ask_book
                .add_order(ref_id, price, shares, real)
                .map_err(OrderBookError::ask)?;
            Ok((None, Vec::new()))
        } else {
            debug!(ref_id, price, shares, "ask crosses spread, executing against bids");
            self.bid_book.execute_market(ref_id, shares, false).map_err(OrderBookError::bid)
        }
    }

    /// Decode a raw historical-feed tag into a [`Message`], resolving the
    /// implicit side of an execute/cancel/delete/replace tag by checking
    /// which half-book currently holds `ref_id` — mirroring how the
    /// source's matched-book `execute_order`/`cancel_order`/
    /// `delete_order`/`replace_order` resolve `ref in self.ask_book` vs
    /// `ref in self.bid_book` before dispatching, since those tags never
    /// carry Ask/Bid on the wire the way `AA`/`AB` (and their `2`-suffixed
    /// agent variants) do. An unrecognized tag, or a side-specific tag
    /// naming a ref resting on neither side, is `InvalidMessageTag`.
    pub fn decode_message(
        &self,
        tag: &str,
        ref_id: i64,
        new_ref: i64,
        price: i64,
        shares: u64,
    ) -> Result<Message, OrderBookError> {
        let invalid = || OrderBookError::InvalidMessageTag { tag: tag.to_string(), ref_id };
        match tag {
            "AA" => Ok(Message::AddAsk { ref_id, price, shares }),
            "AA2" => Ok(Message::AddAskAgent { ref_id, price, shares }),
            "AB" => Ok(Message::AddBid { ref_id, price, shares }),
            "AB2" => Ok(Message::AddBidAgent { ref_id, price, shares }),
            "E" | "C" if self.ask_book.contains(ref_id) => Ok(Message::ExecuteAsk { ref_id, shares }),
            "E" | "C" if self.bid_book.contains(ref_id) => Ok(Message::ExecuteBid { ref_id, shares }),
            "X" if self.ask_book.contains(ref_id) => Ok(Message::CancelAsk { ref_id, shares }),
            "X" if self.bid_book.contains(ref_id) => Ok(Message::CancelBid { ref_id, shares }),
            "D" if self.ask_book.contains(ref_id) => Ok(Message::DeleteAsk { ref_id }),
            "D" if self.bid_book.contains(ref_id) => Ok(Message::DeleteBid { ref_id }),
            "U" if self.ask_book.contains(ref_id) => Ok(Message::ReplaceAsk { ref_id, new_ref, price, shares }),
            "U" if self.bid_book.contains(ref_id) => Ok(Message::ReplaceBid { ref_id, new_ref, price, shares }),
            _ => Err(invalid()),
        }
    }

    /// Apply one preprocessed message to the book, returning any fills
    /// produced.
    pub fn process_message(&mut self, msg: Message) -> Result<Outcome, OrderBookError> {
        match msg {
            Message::AddAsk { ref_id, price, shares } => self.add_ask(ref_id, price, shares, true),
            Message::AddBid { ref_id, price, shares } => self.add_bid(ref_id, price, shares, true),
            Message::AddAskAgent { ref_id, price, shares } => self.add_ask(ref_id, price, shares, false),
            Message::AddBidAgent { ref_id, price, shares } => self.add_bid(ref_id, price, shares, false),
            Message::ExecuteAsk { ref_id, shares } => {
                self.ask_book.execute_target(ref_id, shares, true).map_err(OrderBookError::ask)
            }
            Message::ExecuteBid { ref_id, shares } => {
                self.bid_book.execute_target(ref_id, shares, false).map_err(OrderBookError::bid)
            }
            Message::MarketBuy { ref_id, shares } => {
                self.ask_book.execute_market(ref_id, shares, true).map_err(OrderBookError::ask)
            }
            Message::MarketSell { ref_id, shares } => {
                self.bid_book.execute_market(ref_id, shares, false).map_err(OrderBookError::bid)
            }
            Message::CancelAsk { ref_id, shares } => {
                self.ask_book.cancel_order(ref_id, shares).map_err(OrderBookError::ask)?;
                Ok((None, Vec::new()))
            }
            Message::CancelBid { ref_id, shares } => {
                self.bid_book.cancel_order(ref_id, shares).map_err(OrderBookError::bid)?;
                Ok((None, Vec::new()))
            }
            Message::DeleteAsk { ref_id } => {
                self.ask_book.delete_order(ref_id).map_err(OrderBookError::ask)?;
                Ok((None, Vec::new()))
            }
            Message::DeleteBid { ref_id } => {
                self.bid_book.delete_order(ref_id).map_err(OrderBookError::bid)?;
                Ok((None, Vec::new()))
            }
            Message::ReplaceAsk { ref_id, new_ref, price, shares } => {
                self.ask_book
                    .replace_order(ref_id, new_ref, price, shares)
                    .map_err(OrderBookError::ask)?;
                Ok((None, Vec::new()))
            }
            Message::ReplaceBid { ref_id, new_ref, price, shares } => {
                self.bid_book
                    .replace_order(ref_id, new_ref, price, shares)
                    .map_err(OrderBookError::bid)?;
                Ok((None, Vec::new()))
            }
        }
    }
}
