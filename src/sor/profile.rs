//! Tracks what the router currently has resting on one side of the
//! book, so it can re-anchor or top up without over-submitting.

use std::collections::HashMap;

/// A single outstanding router-submitted order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionInfo {
    pub price: i64,
    pub shares: u64,
}

/// Router-owned order book for one side: how much is currently
/// submitted, and by which refs.
#[derive(Debug, Default)]
pub struct Profile {
    pub submitted: u64,
    pub orders: HashMap<i64, ExecutionInfo>,
}

impl Profile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a fill against one of this profile's own resting orders:
    /// shrink or remove the tracked order and reduce `submitted` by the
    /// filled amount. No-op if the ref isn't one the router placed
    /// itself (a fill against real-order liquidity elsewhere).
    pub fn apply_fill(&mut self, ref_id: i64, shares: u64) {
        if let Some(info) = self.orders.get_mut(&ref_id) {
            if info.shares <= shares {
                self.orders.remove(&ref_id);
            } else {
                info.shares -= shares;
            }
            self.submitted = self.submitted.saturating_sub(shares);
        }
    }
}
