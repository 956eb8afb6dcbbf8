//! Aggregate statistics over a run's trade records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::settlement::TradeRecord;

/// Summary statistics for one backtest run. Order-independent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of trades taken.
    pub trades: usize,
    /// Trades with positive PnL.
    pub wins: usize,
    /// Wins over trades, 0.0 for an empty run.
    pub win_rate: f64,
    /// Mean PnL per trade, zero for an empty run.
    pub avg_pnl: Decimal,
    /// Total PnL across all trades.
    pub total_pnl: Decimal,
    /// Mean seconds from trigger to window end, rounded to the nearest
    /// second; zero for an empty run.
    pub avg_tte_secs: i64,
}

impl Summary {
    /// Computes summary statistics from settled trades.
    ///
    /// An empty slice yields the zeroed summary rather than dividing by
    /// zero.
    #[must_use]
    pub fn from_trades(trades: &[TradeRecord]) -> Self {
        if trades.is_empty() {
            return Self::empty();
        }

        let count = trades.len();
        let wins = trades.iter().filter(|t| t.pnl > Decimal::ZERO).count();
        let total_pnl: Decimal = trades.iter().map(|t| t.pnl).sum();
        let total_tte: i64 = trades.iter().map(|t| t.tte_secs).sum();

        Self {
            trades: count,
            wins,
            win_rate: wins as f64 / count as f64,
            avg_pnl: total_pnl / Decimal::from(count as u64),
            total_pnl,
            avg_tte_secs: (total_tte as f64 / count as f64).round() as i64,
        }
    }

    /// The summary of a run with no trades.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            trades: 0,
            wins: 0,
            win_rate: 0.0,
            avg_pnl: Decimal::ZERO,
            total_pnl: Decimal::ZERO,
            avg_tte_secs: 0,
        }
    }
}
