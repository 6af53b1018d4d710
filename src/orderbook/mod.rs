//! The matched book: pairs an ask and a bid half-book and dispatches
//! preprocessed feed messages against them.

mod error;
mod matched;
mod message;

pub use error::OrderBookError;
pub use matched::{Outcome, OrderBook};
pub use message::Message;
