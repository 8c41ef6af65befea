//! # Derived Trade Statistics
//!
//! Aggregates shown on the dashboard and trades screens, computed from the
//! trade list held in the client store.
//!
//! Only closed trades contribute to win rate and P&L; the pnl of an open
//! trade is ignored even when the backend reports one.

use serde::{Deserialize, Serialize};

use crate::dto::trading::{Trade, TradeStatus};

/// Summary statistics over a list of trades
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TradeStats {
    /// Number of trades in the list
    pub total_trades: usize,
    /// Percentage (0-100) of closed trades with positive pnl
    pub win_rate: f64,
    /// Sum of pnl over closed trades (missing pnl counts as zero)
    #[serde(rename = "totalPnL")]
    pub total_pnl: f64,
    /// Number of open trades
    pub active_positions: usize,
}

impl TradeStats {
    /// Compute statistics in a single pass over `trades`.
    pub fn from_trades(trades: &[Trade]) -> Self {
        let mut closed = 0usize;
        let mut wins = 0usize;
        let mut open = 0usize;
        let mut total_pnl = 0.0;

        for trade in trades {
            match trade.status {
                TradeStatus::Open => open += 1,
                TradeStatus::Closed => {
                    closed += 1;
                    let pnl = trade.pnl.unwrap_or(0.0);
                    if pnl > 0.0 {
                        wins += 1;
                    }
                    total_pnl += pnl;
                }
            }
        }

        let win_rate = if closed > 0 {
            (wins as f64 / closed as f64) * 100.0
        } else {
            0.0
        };

        Self {
            total_trades: trades.len(),
            win_rate,
            total_pnl,
            active_positions: open,
        }
    }

    /// Alias used by the trade summary panel.
    pub fn open_trades(&self) -> usize {
        self.active_positions
    }

    pub fn closed_trades(&self) -> usize {
        self.total_trades - self.active_positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::trading::TradeSide;
    use proptest::prelude::*;

    fn trade(id: usize, status: TradeStatus, pnl: Option<f64>) -> Trade {
        Trade {
            id: format!("t{}", id),
            symbol: "BTCUSDT".to_string(),
            side: TradeSide::Buy,
            quantity: 1.0,
            price: 100.0,
            status,
            pnl,
            created_at: "2024-01-01T00:00:00Z".to_string(),
            closed_at: None,
        }
    }

    #[test]
    fn test_worked_example() {
        let trades = vec![
            trade(1, TradeStatus::Closed, Some(100.0)),
            trade(2, TradeStatus::Closed, Some(-40.0)),
            trade(3, TradeStatus::Open, None),
        ];
        let stats = TradeStats::from_trades(&trades);
        assert_eq!(stats.total_trades, 3);
        assert_eq!(stats.win_rate, 50.0);
        assert_eq!(stats.total_pnl, 60.0);
        assert_eq!(stats.active_positions, 1);
        assert_eq!(stats.open_trades(), 1);
        assert_eq!(stats.closed_trades(), 2);
    }

    #[test]
    fn test_empty_list() {
        let stats = TradeStats::from_trades(&[]);
        assert_eq!(stats, TradeStats::default());
    }

    #[test]
    fn test_only_open_trades_have_zero_win_rate() {
        let trades = vec![trade(1, TradeStatus::Open, Some(25.0)), trade(2, TradeStatus::Open, None)];
        let stats = TradeStats::from_trades(&trades);
        assert_eq!(stats.win_rate, 0.0);
        assert_eq!(stats.total_pnl, 0.0);
        assert_eq!(stats.active_positions, 2);
    }

    #[test]
    fn test_closed_without_pnl_counts_as_loss_free_zero() {
        let trades = vec![trade(1, TradeStatus::Closed, None), trade(2, TradeStatus::Closed, Some(10.0))];
        let stats = TradeStats::from_trades(&trades);
        assert_eq!(stats.win_rate, 50.0);
        assert_eq!(stats.total_pnl, 10.0);
    }

    #[test]
    fn test_serializes_dashboard_keys() {
        let value = serde_json::to_value(TradeStats::default()).unwrap();
        assert!(value.get("totalTrades").is_some());
        assert!(value.get("totalPnL").is_some());
        assert!(value.get("activePositions").is_some());
    }

    fn arb_trade() -> impl Strategy<Value = (bool, Option<f64>)> {
        (any::<bool>(), proptest::option::of(-10_000.0f64..10_000.0))
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            .. ProptestConfig::default()
        })]

        #[test]
        fn stats_match_definition(specs in prop::collection::vec(arb_trade(), 0..60)) {
            let trades: Vec<Trade> = specs
                .iter()
                .enumerate()
                .map(|(i, (closed, pnl))| {
                    let status = if *closed { TradeStatus::Closed } else { TradeStatus::Open };
                    trade(i, status, *pnl)
                })
                .collect();

            let stats = TradeStats::from_trades(&trades);

            prop_assert_eq!(stats.total_trades, trades.len());

            let open = trades.iter().filter(|t| t.status == TradeStatus::Open).count();
            prop_assert_eq!(stats.active_positions, open);

            let closed: Vec<&Trade> = trades.iter().filter(|t| t.status == TradeStatus::Closed).collect();
            if closed.is_empty() {
                prop_assert_eq!(stats.win_rate, 0.0);
            } else {
                let wins = closed.iter().filter(|t| t.pnl.unwrap_or(0.0) > 0.0).count();
                let expected = 100.0 * wins as f64 / closed.len() as f64;
                prop_assert!((stats.win_rate - expected).abs() < 1e-9);
            }
            prop_assert!((0.0..=100.0).contains(&stats.win_rate));

            let expected_pnl: f64 = closed.iter().map(|t| t.pnl.unwrap_or(0.0)).sum();
            prop_assert!((stats.total_pnl - expected_pnl).abs() < 1e-6);
        }

        #[test]
        fn stats_are_idempotent(specs in prop::collection::vec(arb_trade(), 0..40)) {
            let trades: Vec<Trade> = specs
                .iter()
                .enumerate()
                .map(|(i, (closed, pnl))| {
                    let status = if *closed { TradeStatus::Closed } else { TradeStatus::Open };
                    trade(i, status, *pnl)
                })
                .collect();

            prop_assert_eq!(TradeStats::from_trades(&trades), TradeStats::from_trades(&trades));
        }
    }
}
