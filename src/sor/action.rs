//! The router's discrete action space.

/// Maps an action index (0..=8) to the (ask_level, bid_level) pair of
/// quote depths the router should hold on each side. Level 1 means
/// join the best real quote, level 2 the second-best, and so on.
pub type ActionMap = [(u32, u32); 9];

/// The concrete table used by the original system: actions 0-4 are
/// symmetric depth pairs, 5-8 skew one side deeper than the other.
pub const DEFAULT_ACTION_MAP: ActionMap = [
    (1, 1),
    (2, 2),
    (3, 3),
    (4, 4),
    (5, 5),
    (1, 3),
    (3, 1),
    (2, 5),
    (5, 2),
];

/// Action index reserved for liquidation: cancel all agent orders on
/// the position-holding side and submit a market order for `alpha`
/// times the current absolute position against the opposite side.
pub const LIQUIDATE_ACTION: u8 = 9;
