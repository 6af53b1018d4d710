//! Smart order router: translates a discrete action into quote
//! placements on both sides of the book and nets resulting fills into
//! a running position and P&L.

mod action;
mod error;
mod pnl;
mod profile;

pub use action::{ActionMap, DEFAULT_ACTION_MAP, LIQUIDATE_ACTION};
pub use error::RouterError;
pub use pnl::PnlLedger;
pub use profile::{ExecutionInfo, Profile};

use tracing::debug;

use crate::book::Fill;
use crate::feed::Feed;
use crate::orderbook::OrderBook;

/// Maintains the agent's quoting state on both sides of the book and
/// its realized P&L, driven by discrete actions and the fills they
/// eventually produce.
pub struct Router {
    ask_profile: Profile,
    bid_profile: Profile,
    position: i64,
    pnl: PnlLedger,
    target_size: u64,
    alpha: f64,
    skip_size: i64,
    action_map: ActionMap,
}

impl Router {
    pub fn new(target_size: u64, alpha: f64, skip_size: i64, action_map: ActionMap) -> Self {
        Self {
            ask_profile: Profile::new(),
            bid_profile: Profile::new(),
            position: 0,
            pnl: PnlLedger::new(),
            target_size,
            alpha,
            skip_size,
            action_map,
        }
    }

    pub fn position(&self) -> i64 {
        self.position
    }

    pub fn realized_pnl(&self) -> i128 {
        self.pnl.realized()
    }

    pub fn ask_profile(&self) -> &Profile {
        &self.ask_profile
    }

    pub fn bid_profile(&self) -> &Profile {
        &self.bid_profile
    }

    /// Translate `action` into feed messages. `9` liquidates; `0..=8`
    /// re-anchors both sides to the quote depths named in the action
    /// map.
    pub fn execute(&mut self, action: u8, feed: &mut Feed, book: &OrderBook) -> Result<(), RouterError> {
        if action == LIQUIDATE_ACTION {
            self.liquidate(feed);
            return Ok(());
        }
        let (ask_level, bid_level) = *self
            .action_map
            .get(action as usize)
            .ok_or(RouterError::UnknownAction(action))?;
        self.execute_single_book(ask_level, true, feed, book);
        self.execute_single_book(bid_level, false, feed, book);
        Ok(())
    }

    fn execute_single_book(&mut self, level: u32, is_ask: bool, feed: &mut Feed, book: &OrderBook) {
        let target_price = if is_ask {
            book.real_ask_price((level - 1) as usize)
        } else {
            book.real_bid_price((level - 1) as usize)
        };
        let profile = if is_ask { &mut self.ask_profile } else { &mut self.bid_profile };

        let stale: Vec<i64> = profile
            .orders
            .iter()
            .filter(|(_, info)| (info.price - target_price).abs() > self.skip_size)
            .map(|(&r, _)| r)
            .collect();
        for r in stale {
            let info = profile.orders.remove(&r).expect("just observed in orders");
            feed.delete(r, is_ask);
            profile.submitted = profile.submitted.saturating_sub(info.shares);
        }

        if profile.submitted < self.target_size {
            let shares = self.target_size - profile.submitted;
            let ref_id = feed.add_limit(target_price, shares, is_ask);
            profile.orders.insert(ref_id, ExecutionInfo { price: target_price, shares });
            profile.submitted = self.target_size;
            debug!(ref_id, target_price, shares, is_ask, "router placed order");
        }
    }

    fn liquidate(&mut self, feed: &mut Feed) {
        let position = self.position;
        let clear_ask = position <= 0;
        if clear_ask {
            let refs: Vec<i64> = self.ask_profile.orders.keys().copied().collect();
            for r in refs {
                feed.delete(r, true);
            }
            self.ask_profile.orders.clear();
            self.ask_profile.submitted = 0;
        } else {
            let refs: Vec<i64> = self.bid_profile.orders.keys().copied().collect();
            for r in refs {
                feed.delete(r, false);
            }
            self.bid_profile.orders.clear();
            self.bid_profile.submitted = 0;
        }

        let shares = (self.alpha * position.unsigned_abs() as f64) as u64;
        let buy = position < 0;
        let ref_id = feed.add_market(shares, buy);
        debug!(ref_id, shares, buy, "router liquidating position");
        let info = ExecutionInfo { price: 0, shares };
        if clear_ask {
            self.bid_profile.orders.insert(ref_id, info);
            self.bid_profile.submitted += shares;
        } else {
            self.ask_profile.orders.insert(ref_id, info);
            self.ask_profile.submitted += shares;
        }
    }

    /// Reconcile fills from one `process_message` call against the
    /// router's own submission ledger, adjusting position and realized
    /// P&L. `is_buy` is the direction flag `OrderBook::process_message`
    /// returned alongside `fills`.
    pub fn on_fills(&mut self, is_buy: bool, fills: &[Fill]) -> u64 {
        let profile = if is_buy { &mut self.bid_profile } else { &mut self.ask_profile };
        let mut total = 0u64;
        for fill in fills {
            profile.apply_fill(fill.ref_id, fill.shares);
            total += fill.shares;
        }
        if total == 0 {
            return 0;
        }
        if is_buy {
            self.position += total as i64;
        } else {
            self.position -= total as i64;
        }
        for fill in fills {
            self.pnl.record(is_buy, fill.price, fill.shares);
        }
        total
    }
}
