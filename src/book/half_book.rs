//! One side of a matched order book.
//!
//! A `HalfBook` holds every resting order on one side (asks or bids),
//! indexed both by price (for best-quote and walk-the-book access) and
//! by ref (for O(1) cancel/delete/replace of an arbitrary resting
//! order). Deletions are lazy: an order is marked invalid and unlinked
//! from the ref index immediately, but is only physically popped out of
//! its price level's queue once that level becomes the front of the
//! book (see [`HalfBook::update_book`]).

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::rc::Rc;

use super::error::BookError;
use super::level::{Level, OrderHandle};
use super::order::Order;

/// Which side of the book a `HalfBook` represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Ask,
    Bid,
}

/// Sentinel best-quote used before any order has ever rested on this
/// side, chosen so that it never crosses a real price on the opposite
/// side.
const DEFAULT_ASK_QUOTE: i64 = 100_000_000;
const DEFAULT_BID_QUOTE: i64 = 0;

/// A single fill produced while walking the book. A market-order walk
/// ([`HalfBook::execute_market`]) reports every leg it consumes,
/// tagged with the walking order's own ref; a targeted execution
/// ([`HalfBook::execute_target`]) only reports the agent-held legs it
/// shadow-consumes along the way, each tagged with its own ref.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fill {
    /// The ref of the order that was actually consumed.
    pub ref_id: i64,
    pub price: i64,
    pub shares: u64,
}

/// One side of the book: every resting ask, or every resting bid.
pub struct HalfBook {
    side: Side,
    /// Price levels keyed by `sort_key(price)` so that iteration order
    /// (ascending `BTreeMap` order) is always best-quote-first,
    /// regardless of side.
    levels: BTreeMap<i64, Level>,
    /// ref -> order handle, for orders currently resting.
    pool: HashMap<i64, OrderHandle>,
    /// Refs belonging to real orders consumed by a hypothetical agent
    /// market order. Membership is permanent, not one-shot: every
    /// subsequent real message naming one of these refs is a no-op,
    /// since the real trajectory must look identical whether or not the
    /// agent ever existed, no matter how many more messages the feed
    /// still has queued up against that ref.
    ref_pool: HashSet<i64>,
    /// Total shares ever posted at each price, keyed by real price. This
    /// ledger is never pruned, even after a level empties out.
    volumes: HashMap<i64, i64>,
    max_volume_levels: usize,
}

impl HalfBook {
    pub fn new(side: Side, max_volume_levels: usize) -> Self {
        Self {
            side,
            levels: BTreeMap::new(),
            pool: HashMap::new(),
            ref_pool: HashSet::new(),
            volumes: HashMap::new(),
            max_volume_levels,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    fn sort_key(&self, price: i64) -> i64 {
        match self.side {
            Side::Ask => price,
            Side::Bid => -price,
        }
    }

    fn key_to_price(&self, key: i64) -> i64 {
        match self.side {
            Side::Ask => key,
            Side::Bid => -key,
        }
    }

    fn default_quote(&self) -> i64 {
        match self.side {
            Side::Ask => DEFAULT_ASK_QUOTE,
            Side::Bid => DEFAULT_BID_QUOTE,
        }
    }

    /// True when `price` rests strictly behind `quote` in this side's
    /// priority order (a worse price than the touch).
    fn is_behind(&self, price: i64, quote: i64) -> bool {
        match self.side {
            Side::Ask => price > quote,
            Side::Bid => price < quote,
        }
    }

    /// True if `ref_id` names a resting order or a shadow-consumed real
    /// ref. Membership in either makes the ref "known" to this side.
    pub fn contains(&self, ref_id: i64) -> bool {
        self.pool.contains_key(&ref_id) || self.ref_pool.contains(&ref_id)
    }

    pub fn best_quote(&self) -> i64 {
        self.levels
            .keys()
            .next()
            .map(|&k| self.key_to_price(k))
            .unwrap_or_else(|| self.default_quote())
    }

    /// Total volume ever posted at the current touch price. Returns 0
    /// when the book is empty rather than panicking, unlike the source
    /// this is grounded on, since an empty book has no touch to report.
    pub fn quote_volume(&self) -> i64 {
        self.levels
            .keys()
            .next()
            .map(|&k| self.volumes.get(&self.key_to_price(k)).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    /// Count of distinct prices ever touched on this side, all-time.
    /// Mirrors the source's un-pruned volume ledger used for the
    /// runaway-level guard.
    pub fn volume_level_count(&self) -> usize {
        self.volumes.len()
    }

    fn update_volume(&mut self, price: i64, delta: i64) -> Result<(), BookError> {
        *self.volumes.entry(price).or_insert(0) += delta;
        if self.volumes.len() > self.max_volume_levels {
            return Err(BookError::VolumeLevelExplosion {
                count: self.volumes.len(),
                limit: self.max_volume_levels,
            });
        }
        Ok(())
    }

    /// Evict invalid orders from the front of the book, dropping any
    /// price level that becomes empty in the process. Every mutating
    /// operation calls this before returning.
    fn update_book(&mut self) {
        loop {
            let key = match self.levels.keys().next().copied() {
                Some(k) => k,
                None => break,
            };
            let level = self.levels.get_mut(&key).expect("key just observed");
            while let Some(front) = level.queue.front() {
                if front.borrow().valid {
                    break;
                }
                level.queue.pop_front();
            }
            if level.queue.is_empty() {
                self.levels.remove(&key);
            } else {
                break;
            }
        }
    }

    fn remove(&mut self, ref_id: i64) {
        if let Some(handle) = self.pool.remove(&ref_id) {
            handle.borrow_mut().valid = false;
        }
    }

    /// The order resting at the very front of the book, if any.
    fn front_handle(&self) -> Option<OrderHandle> {
        self.levels.values().next()?.queue.front().cloned()
    }

    /// Distinct prices, touch-first, of every level holding at least one
    /// live real order. Used by the smart order router to anchor its
    /// quotes to actual resting liquidity rather than its own orders.
    pub fn real_price_levels(&self) -> Vec<i64> {
        self.levels
            .values()
            .filter(|level| level.queue.iter().any(|h| {
                let o = h.borrow();
                o.valid && o.real
            }))
            .map(|level| level.price)
            .collect()
    }

    /// The price at a given 0-indexed depth among levels holding a live
    /// real order, extrapolated one tick per extra level beyond the
    /// deepest level actually resting.
    pub fn real_price_at_depth(&self, depth: usize) -> i64 {
        let levels = self.real_price_levels();
        match levels.get(depth) {
            Some(&price) => price,
            None => {
                let tick = match self.side {
                    Side::Ask => 1,
                    Side::Bid => -1,
                };
                match levels.last() {
                    Some(&last) => last + tick * (depth - levels.len() + 1) as i64,
                    None => self.best_quote() + tick * (depth as i64 + 1),
                }
            }
        }
    }

    /// The first real (non-agent) order found walking the book from the
    /// touch outward, regardless of its valid flag.
    fn front_real_ref(&self) -> Option<i64> {
        for level in self.levels.values() {
            for handle in &level.queue {
                let order = handle.borrow();
                if order.real {
                    return Some(order.ref_id);
                }
            }
        }
        None
    }

    pub fn add_order(&mut self, ref_id: i64, price: i64, shares: u64, real: bool) -> Result<(), BookError> {
        if self.pool.contains_key(&ref_id) {
            return Err(BookError::PrimaryKeyConflict(ref_id));
        }
        let order: OrderHandle = Rc::new(RefCell::new(Order::new(ref_id, price, shares, real)));
        self.pool.insert(ref_id, order.clone());
        let key = self.sort_key(price);
        self.levels
            .entry(key)
            .or_insert_with(|| Level::new(price))
            .queue
            .push_back(order);
        self.update_volume(price, shares as i64)
    }

    /// Reduce a resting order by `shares`. A cancel that asks for at
    /// least as many shares as remain is treated as a full removal
    /// rather than an error, matching how a stale or slightly-racy
    /// cancel message is handled upstream.
    pub fn cancel_order(&mut self, ref_id: i64, shares: u64) -> Result<(), BookError> {
        if self.ref_pool.contains(&ref_id) {
            return Ok(());
        }
        let handle = self.pool.get(&ref_id).expect("cancel target must be resting").clone();
        let price = handle.borrow().price;
        let available = handle.borrow().shares;
        if shares >= available {
            handle.borrow_mut().valid = false;
            self.pool.remove(&ref_id);
            self.update_volume(price, -(available as i64))?;
        } else {
            handle.borrow_mut().shares -= shares;
            self.update_volume(price, -(shares as i64))?;
        }
        self.update_book();
        Ok(())
    }

    pub fn delete_order(&mut self, ref_id: i64) -> Result<(), BookError> {
        if self.ref_pool.contains(&ref_id) {
            return Ok(());
        }
        let handle = self.pool.get(&ref_id).expect("delete target must be resting").clone();
        let (price, remaining) = {
            let order = handle.borrow();
            (order.price, order.shares)
        };
        self.remove(ref_id);
        self.update_book();
        self.update_volume(price, -(remaining as i64))
    }

    pub fn replace_order(&mut self, ref_id: i64, new_ref: i64, price: i64, shares: u64) -> Result<(), BookError> {
        if self.ref_pool.contains(&ref_id) {
            return Ok(());
        }
        if !self.pool.contains_key(&ref_id) {
            return Err(BookError::ReplaceMissingSource(ref_id));
        }
        self.delete_order(ref_id)?;
        self.add_order(new_ref, price, shares, true)
    }

    /// Run `shares` as a market order against this side, with no specific
    /// target: one continuous walk from the touch, spent across as many
    /// resting orders as it takes. Used both for a genuine agent market
    /// order (`ref_id` is the agent's own negative ref) and for an add
    /// that crosses the spread on arrival (`ref_id` is that add's own
    /// ref, real or agent) — in both cases `ref_id` names the order
    /// *causing* the trade, not anything being consumed.
    ///
    /// Every leg consumed is reported as its own fill tagged with
    /// `ref_id` (not the consumed order's ref) and the shares taken from
    /// it on that step; this is the trade confirmation for whoever is
    /// causing the walk, real or synthetic. A real order fully consumed
    /// here that did not name itself as `ref_id` is parked in the shadow
    /// pool, same as an agent-caused consumption, since any further real
    /// message naming it must now be a no-op.
    pub fn execute_market(&mut self, ref_id: i64, shares: u64, is_ask_side: bool) -> Result<(Option<bool>, Vec<Fill>), BookError> {
        if self.ref_pool.contains(&ref_id) {
            return Ok((None, Vec::new()));
        }
        self.update_book();

        let mut executed = Vec::new();
        let mut prev_remaining = shares;
        let mut remaining = shares;
        while remaining > 0 {
            let front = match self.front_handle() {
                Some(handle) => handle,
                None => {
                    return Err(BookError::ExecutionExceedsAvailable {
                        ref_id,
                        shares,
                        available: shares - remaining,
                    });
                }
            };
            let (front_ref, front_price, front_shares) = {
                let b = front.borrow();
                (b.ref_id, b.price, b.shares)
            };
            if front_shares <= remaining {
                self.remove(front_ref);
                remaining -= front_shares;
                self.update_volume(front_price, -(front_shares as i64))?;
                if front_ref != ref_id {
                    self.ref_pool.insert(front_ref);
                }
            } else {
                front.borrow_mut().shares -= remaining;
                self.update_volume(front_price, -(remaining as i64))?;
                remaining = 0;
            }
            self.update_book();
            executed.push(Fill {
                ref_id,
                price: front_price,
                shares: prev_remaining - remaining,
            });
            prev_remaining = remaining;
        }

        let is_buy = is_ask_side ^ (ref_id > 0);
        Ok((Some(is_buy), executed))
    }

    /// Execute `shares` against the specific resting real order `ref_id`
    /// (always non-negative: only the historical feed issues this, and
    /// it only ever names its own real orders).
    ///
    /// If that order is not at the front of the book, or is itself the
    /// front-most real order, anything standing in front of it on the
    /// touch is shadow liquidity that would not be there without the
    /// agent (or, at worst, is a real order the feed's own ordering
    /// guarantees would already be gone): it is shadow-consumed in full,
    /// one order at a time, and parked in the shadow pool. An
    /// agent-held leg consumed this way is reported as its own fill,
    /// tagged with *its* ref — this is the notification the SOR needs
    /// that its own resting order was hit. Once the target reaches the
    /// front, the full requested `shares` is applied to it directly;
    /// this part never produces a fill, since the historical message
    /// driving it is itself the confirmation. When the target is
    /// already at the front, `shares` is applied with no walk at all.
    pub fn execute_target(&mut self, ref_id: i64, shares: u64, is_ask_side: bool) -> Result<(Option<bool>, Vec<Fill>), BookError> {
        if self.ref_pool.contains(&ref_id) {
            return Ok((None, Vec::new()));
        }
        self.update_book();

        let quote = self.best_quote();
        let walk = {
            let price = self.pool.get(&ref_id).expect("execute target must be resting").borrow().price;
            self.is_behind(price, quote)
        } || self.front_real_ref() == Some(ref_id);

        let mut executed = Vec::new();
        if walk {
            loop {
                let front = self.front_handle().expect("target must be reachable by walking from the front");
                let (front_ref, front_price, front_shares, front_real) = {
                    let b = front.borrow();
                    (b.ref_id, b.price, b.shares, b.real)
                };
                if front_ref == ref_id {
                    break;
                }
                self.remove(front_ref);
                self.update_volume(front_price, -(front_shares as i64))?;
                self.ref_pool.insert(front_ref);
                if !front_real {
                    executed.push(Fill {
                        ref_id: front_ref,
                        price: front_price,
                        shares: front_shares,
                    });
                }
                self.update_book();
            }
        }

        let handle = self.pool.get(&ref_id).expect("execute target must be resting").clone();
        let available = handle.borrow().shares;
        if shares > available {
            return Err(BookError::ExecutionExceedsAvailable { ref_id, shares, available });
        }
        let price = handle.borrow().price;
        handle.borrow_mut().shares -= shares;
        if handle.borrow().shares == 0 {
            self.remove(ref_id);
        }
        self.update_book();
        self.update_volume(price, -(shares as i64))?;

        let is_buy = is_ask_side ^ (ref_id > 0);
        Ok((Some(is_buy), executed))
    }
}
