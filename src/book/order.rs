//! The order record held by a half-book.

/// A single resting order, either replayed from the historical feed or
/// generated by the trading agent.
///
/// `ref_id` is the order's opaque identifier: non-negative for real
/// (historical) orders, negative for agent-generated ones. `valid`
/// is cleared the instant an order is logically removed; the half-book
/// only ever stores orders with `valid == true` (see [`crate::book::HalfBook`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub ref_id: i64,
    pub price: i64,
    pub shares: u64,
    pub valid: bool,
    pub real: bool,
}

impl Order {
    pub fn new(ref_id: i64, price: i64, shares: u64, real: bool) -> Self {
        Self {
            ref_id,
            price,
            shares,
            valid: true,
            real,
        }
    }

    /// Agent orders carry negative refs; real orders are non-negative.
    pub fn is_agent(&self) -> bool {
        self.ref_id < 0
    }
}
