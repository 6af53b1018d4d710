//! Replays a historical message stream while interleaving synthetic
//! messages submitted by a trading agent, preserving a single
//! time-ordered stream for the matched book to consume.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use crate::orderbook::Message;

/// One message with the logical timestamp it should be applied at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedMessage {
    pub timestamp: u64,
    pub message: Message,
}

/// Merges a historical message tape with a queue of agent-submitted
/// messages, handing the matched book whichever is due next.
///
/// Agent messages are timestamped with [`Feed::schedule_time`], which
/// models network and exchange processing delay: a message submitted
/// "now" is not visible to the book until some random interval later,
/// and the delay clock only advances when real time has actually moved
/// forward since the last submission.
pub struct Feed {
    historical: Vec<TimedMessage>,
    pointer: usize,
    pending: VecDeque<TimedMessage>,
    last_transmission_time: u64,
    last_wall_time: u64,
    wall_time: u64,
    next_agent_ref: i64,
    delay_lb: u64,
    delay_ub: u64,
    rng: StdRng,
}

impl Feed {
    pub fn new(historical: Vec<TimedMessage>, delay_lb: u64, delay_ub: u64, rng_seed: u64) -> Self {
        Self {
            historical,
            pointer: 0,
            pending: VecDeque::new(),
            last_transmission_time: 0,
            last_wall_time: 0,
            wall_time: 0,
            next_agent_ref: -1,
            delay_lb,
            delay_ub,
            rng: StdRng::seed_from_u64(rng_seed),
        }
    }

    pub fn has_next(&self) -> bool {
        self.pointer < self.historical.len() || !self.pending.is_empty()
    }

    /// The next historical message that has not yet been returned by
    /// [`Feed::next`], without consuming it.
    pub fn peek_historical(&self) -> Option<&TimedMessage> {
        self.historical.get(self.pointer)
    }

    /// Pull the next due message, merging the historical tape with
    /// pending agent messages by timestamp. A pending agent message is
    /// released whenever the next historical message (if any) is not
    /// strictly earlier than it, so agent messages never jump ahead of
    /// real history that was already due, but win ties at the same
    /// timestamp.
    pub fn next(&mut self) -> Option<TimedMessage> {
        let next = match (self.historical.get(self.pointer), self.pending.front()) {
            (Some(hist), Some(pend)) if hist.timestamp >= pend.timestamp => self.pending.pop_front().unwrap(),
            (Some(_), _) => {
                let msg = self.historical[self.pointer];
                self.pointer += 1;
                msg
            }
            (None, Some(_)) => self.pending.pop_front().unwrap(),
            (None, None) => return None,
        };
        self.wall_time = next.timestamp;
        trace!(timestamp = next.timestamp, "feed dispatched message");
        Some(next)
    }

    /// Compute the logical timestamp a newly submitted agent message
    /// should carry. Advances the delay clock only when wall time has
    /// moved since the previous call; otherwise successive calls within
    /// the same instant are spaced 500 ticks apart so agent messages
    /// submitted back-to-back never collide.
    fn schedule_time(&mut self) -> u64 {
        if self.last_wall_time < self.wall_time {
            let delay = self.rng.gen_range(self.delay_lb..=self.delay_ub);
            self.last_transmission_time = self.last_transmission_time.max(self.wall_time + delay);
            self.last_wall_time = self.wall_time;
        } else {
            self.last_transmission_time += 500;
        }
        self.last_transmission_time
    }

    fn take_agent_ref(&mut self) -> i64 {
        let r = self.next_agent_ref;
        self.next_agent_ref -= 1;
        r
    }

    /// Submit a resting limit order on behalf of the agent. Returns the
    /// ref it was assigned.
    pub fn add_limit(&mut self, price: i64, shares: u64, ask: bool) -> i64 {
        let ref_id = self.take_agent_ref();
        let timestamp = self.schedule_time();
        let message = if ask {
            Message::AddAskAgent { ref_id, price, shares }
        } else {
            Message::AddBidAgent { ref_id, price, shares }
        };
        self.pending.push_back(TimedMessage { timestamp, message });
        ref_id
    }

    /// Submit a market order on behalf of the agent. Returns the ref it
    /// was assigned.
    pub fn add_market(&mut self, shares: u64, buy: bool) -> i64 {
        let ref_id = self.take_agent_ref();
        let timestamp = self.schedule_time();
        let message = if buy {
            Message::MarketBuy { ref_id, shares }
        } else {
            Message::MarketSell { ref_id, shares }
        };
        self.pending.push_back(TimedMessage { timestamp, message });
        ref_id
    }

    /// Cancel a previously submitted agent order.
    pub fn delete(&mut self, ref_id: i64, ask: bool) {
        let timestamp = self.schedule_time();
        let message = if ask {
            Message::DeleteAsk { ref_id }
        } else {
            Message::DeleteBid { ref_id }
        };
        self.pending.push_back(TimedMessage { timestamp, message });
    }

    /// Drain every historical message whose tag marks it as
    /// agent-authored up front (used to seed the book from a
    /// pre-agent-era prefix of the tape before the agent is switched
    /// on), returning the count consumed.
    pub fn run_build_phase(&mut self, cutoff_timestamp: u64) -> Vec<TimedMessage> {
        let mut out = Vec::new();
        while let Some(msg) = self.historical.get(self.pointer) {
            if msg.timestamp > cutoff_timestamp {
                break;
            }
            out.push(*msg);
            self.pointer += 1;
        }
        out
    }
}
