//! # Order Book Simulation Engine
//!
//! A price-time-priority limit order book that replays a historical
//! feed of add/execute/cancel/delete/replace messages while
//! transparently interleaving a synthetic trading agent's own orders
//! into the same book.
//!
//! ## Design Goals
//!
//! 1. **Replay fidelity** — the book's post-replay state, and every
//!    fill a real order receives, is identical whether or not the agent
//!    ever submitted an order. Agent orders can only ever consume
//!    liquidity that real orders would also have consumed; when that
//!    happens the consumed real order's ref is parked so later real
//!    messages referencing it become silent no-ops.
//! 2. **Price-time priority** — resting orders at the same price are
//!    matched strictly FIFO; better prices always match first.
//! 3. **Single-threaded, cooperative** — there is exactly one writer at
//!    a time; see [`book`] module docs for why this rules out the
//!    lock-free data structures a concurrent matching engine would
//!    need.
//!
//! ## Modules
//!
//! - [`book`] — one side of the book (all resting asks, or all resting
//!   bids): price levels, the ref index, and the matching algorithms.
//! - [`orderbook`] — pairs an ask and a bid half-book into a single
//!   quoted market and dispatches preprocessed messages against them.
//! - [`feed`] — merges the historical message tape with the agent's
//!   own pending messages into one time-ordered stream, modeling
//!   submission delay.
//! - [`sor`] — the smart order router: discrete actions, per-side
//!   quote placement, and P&L netting.
//! - [`config`] and [`metrics`] — run configuration and the summary
//!   counters exposed once a feed is exhausted.

pub mod book;
pub mod config;
pub mod feed;
pub mod metrics;
pub mod orderbook;
pub mod sor;

pub mod prelude;
