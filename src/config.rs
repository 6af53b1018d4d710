//! Run configuration: everything a simulation needs besides the
//! historical message tape itself.

use serde::{Deserialize, Serialize};

use crate::sor::{ActionMap, DEFAULT_ACTION_MAP};

/// A rolling market-state feature the agent can observe. Computing
/// feature values is out of scope for this crate (see the matching
/// engine's module docs); this enum exists so `Config` round-trips the
/// feature set a driver selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feature {
    /// Current spread.
    Sprd,
    /// Ask-side quote volume.
    Avol,
    /// Bid-side quote volume.
    Bvol,
    /// Mid-price move over the last `n` ticks.
    Mpmv(u32),
    /// Spread delta over the last `n` ticks.
    Mspd(u32),
}

/// Parameters governing the router, the feed's delay model, and the
/// guard rails of the matching engine. Deserializable from whatever
/// config format a driver chooses to load (JSON by default, via
/// `serde_json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Fraction of the current absolute position a liquidation action
    /// reduces it by.
    pub liquidation_rate: f64,
    /// Shares the router tries to keep resting on each side.
    pub target_size: u64,
    /// Ticks of drift tolerated before a resting router order is
    /// considered stale and re-anchored.
    pub skip_size: i64,
    /// Market-state features a driver may compute and feed to the
    /// agent.
    pub features: Vec<Feature>,
    /// Lower bound, in ticks, of the feed's injection delay.
    pub delay_lb: u64,
    /// Upper bound, in ticks, of the feed's injection delay.
    pub delay_ub: u64,
    /// Seed for the feed's delay RNG, so a run is reproducible.
    pub rng_seed: u64,
    /// All-time distinct price levels a half-book's volume ledger may
    /// hold before the run is aborted.
    pub max_volume_levels: usize,
    #[serde(skip, default = "default_action_map")]
    pub action_map: ActionMap,
}

fn default_action_map() -> ActionMap {
    DEFAULT_ACTION_MAP
}

impl Default for Config {
    fn default() -> Self {
        Self {
            liquidation_rate: 0.3,
            target_size: 100,
            skip_size: 500,
            features: Vec::new(),
            delay_lb: 15_000,
            delay_ub: 25_000,
            rng_seed: 0,
            max_volume_levels: 20_000,
            action_map: DEFAULT_ACTION_MAP,
        }
    }
}
