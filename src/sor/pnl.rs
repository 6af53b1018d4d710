//! FIFO netting of buy and sell fills into a running P&L.

use std::collections::VecDeque;

#[derive(Debug, Clone, Copy)]
struct Lot {
    price: i64,
    shares: u64,
}

/// Nets buy-side fills against sell-side fills in FIFO order, the way a
/// position's realized P&L is computed from a trade blotter: the
/// earliest open buy is matched against the earliest open sell, and
/// whichever side has more remaining shares stays queued for the next
/// match.
#[derive(Debug, Default)]
pub struct PnlLedger {
    buys: VecDeque<Lot>,
    sells: VecDeque<Lot>,
    realized: i128,
}

impl PnlLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn realized(&self) -> i128 {
        self.realized
    }

    /// Record one fill and immediately net it against any open
    /// opposite-side lots.
    pub fn record(&mut self, is_buy: bool, price: i64, shares: u64) {
        if shares == 0 {
            return;
        }
        let queue = if is_buy { &mut self.buys } else { &mut self.sells };
        queue.push_back(Lot { price, shares });
        self.net();
    }

    fn net(&mut self) {
        loop {
            let (Some(buy), Some(sell)) = (self.buys.front().copied(), self.sells.front().copied()) else {
                break;
            };
            let overlap = buy.shares.min(sell.shares);
            self.realized += (sell.price - buy.price) as i128 * overlap as i128;

            if buy.shares == overlap {
                self.buys.pop_front();
            } else {
                self.buys.front_mut().unwrap().shares -= overlap;
            }
            if sell.shares == overlap {
                self.sells.pop_front();
            } else {
                self.sells.front_mut().unwrap().shares -= overlap;
            }
        }
    }
}
