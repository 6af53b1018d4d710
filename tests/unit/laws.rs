//! The four quantified laws: replay equivalence, real-trajectory
//! invariance, netting idempotence, and delay monotonicity.

use sim_orderbook::prelude::*;

/// A fully-real message sequence (no agent orders at all) must replay
/// from an empty book back to empty with no errors and with the book
/// left in a consistent quoted state throughout.
#[test]
fn replay_equivalence_holds_with_no_agent_messages() {
    let mut book = OrderBook::new(20_000);
    let script = [
        Message::AddBid { ref_id: 1, price: 100, shares: 10 },
        Message::AddAsk { ref_id: 2, price: 102, shares: 10 },
        Message::AddBid { ref_id: 3, price: 101, shares: 5 },
        Message::ExecuteBid { ref_id: 3, shares: 5 },
        Message::ExecuteBid { ref_id: 1, shares: 10 },
        Message::DeleteAsk { ref_id: 2 },
    ];
    for msg in script {
        book.process_message(msg).unwrap();
    }
    assert_eq!(book.bid_quote_volume(), 0);
    assert_eq!(book.ask_quote_volume(), 0);
}

/// Whether or not an agent order is ever injected, a real order's own
/// final resting state is identical: the agent can only ever consume
/// liquidity that the real order flow would also have consumed.
#[test]
fn real_trajectory_is_unaffected_by_an_interleaved_agent_order() {
    let mut without_agent = OrderBook::new(20_000);
    without_agent.process_message(Message::AddBid { ref_id: 1, price: 100, shares: 10 }).unwrap();
    without_agent.process_message(Message::ExecuteBid { ref_id: 1, shares: 4 }).unwrap();

    let mut with_agent = OrderBook::new(20_000);
    with_agent.process_message(Message::AddBid { ref_id: 1, price: 100, shares: 10 }).unwrap();
    with_agent.process_message(Message::AddBidAgent { ref_id: -1, price: 101, shares: 3 }).unwrap();
    with_agent.process_message(Message::ExecuteBid { ref_id: 1, shares: 4 }).unwrap();

    // The agent leg rests at a better price and is fully shadow-consumed
    // before the real target is reached, so the real order's own final
    // resting state is identical whether or not the agent order existed.
    assert_eq!(without_agent.bid_quote_volume(), with_agent.bid_quote_volume());
    assert_eq!(without_agent.best_bid(), with_agent.best_bid());
}

/// `position = Σbuys − Σsells`, and realized P&L matches the FIFO
/// netting formula: each overlap between a queued buy lot and a queued
/// sell lot contributes `(sell.price − buy.price) × overlap`. A
/// zero-fill call is idempotent: it changes neither figure.
#[test]
fn netting_matches_position_and_fifo_pnl_formula_and_is_idempotent_on_empty_fills() {
    let mut router = Router::new(100, 0.3, 500, DEFAULT_ACTION_MAP);

    let buys = [Fill { ref_id: -1, price: 100, shares: 10 }, Fill { ref_id: -2, price: 102, shares: 5 }];
    let sells = [Fill { ref_id: -3, price: 105, shares: 8 }, Fill { ref_id: -4, price: 101, shares: 7 }];

    router.on_fills(true, &buys);
    router.on_fills(false, &sells);

    let total_buys: i64 = buys.iter().map(|f| f.shares as i64).sum();
    let total_sells: i64 = sells.iter().map(|f| f.shares as i64).sum();
    assert_eq!(router.position(), total_buys - total_sells);

    // FIFO lots: buys (100,10) (102,5); sells (105,8) (101,7).
    // (100,10) vs (105,8): overlap 8, pnl += (105-100)*8 = 40, buys -> (100,2)
    // (100,2)  vs (101,7): overlap 2, pnl += (101-100)*2 = 2,  sells -> (101,5)
    assert_eq!(router.realized_pnl(), 42);

    let position_before = router.position();
    let pnl_before = router.realized_pnl();
    let total = router.on_fills(true, &[]);
    assert_eq!(total, 0);
    assert_eq!(router.position(), position_before);
    assert_eq!(router.realized_pnl(), pnl_before);
}

/// Two agent submissions issued back-to-back never collide in time and
/// neither one is visible earlier than the configured minimum delay.
#[test]
fn delay_monotonicity_holds_across_repeated_submissions() {
    let mut feed = Feed::new(
        vec![TimedMessage { timestamp: 500, message: Message::AddAsk { ref_id: 1, price: 100, shares: 1 } }],
        15_000,
        25_000,
        9,
    );
    let t = feed.next().unwrap().timestamp;

    let mut refs = Vec::new();
    for i in 0..5 {
        refs.push(if i % 2 == 0 { feed.add_limit(100 + i, 1, true) } else { feed.add_market(1, false) });
    }

    let mut last = None;
    for _ in 0..5 {
        let tm = feed.next().unwrap();
        if let Some(prev) = last {
            assert!(tm.timestamp > prev);
        }
        assert!(tm.timestamp >= t + 15_000);
        last = Some(tm.timestamp);
    }
}
