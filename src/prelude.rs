//! Re-exports the types most callers need.
//!
//! ```rust
//! use sim_orderbook::prelude::*;
//! ```

pub use crate::book::{BookError, Fill, Side};
pub use crate::config::{Config, Feature};
pub use crate::feed::{Feed, TimedMessage};
pub use crate::metrics::RunMetrics;
pub use crate::orderbook::{Message, OrderBook, OrderBookError, Outcome};
pub use crate::sor::{ActionMap, PnlLedger, Router, RouterError, DEFAULT_ACTION_MAP, LIQUIDATE_ACTION};
