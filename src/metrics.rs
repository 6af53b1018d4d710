//! Summary counters exposed after a run.

/// Aggregate statistics a simulation driver reports once the feed is
/// exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunMetrics {
    pub messages_processed: u64,
    pub final_position: i64,
    pub cumulative_pnl: i128,
    pub agent_fill_count: u64,
}

impl RunMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_message(&mut self) {
        self.messages_processed += 1;
    }

    pub fn record_agent_fills(&mut self, count: u64) {
        self.agent_fill_count += count;
    }
}
