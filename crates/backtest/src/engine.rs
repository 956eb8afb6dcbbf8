//! Per-market orchestration and run accounting.
//!
//! The engine walks the discovered markets sequentially: one market is
//! fully fetched and scored before the next begins. Each market's
//! evaluation runs inside its own failure boundary, so a bad record or a
//! failed price fetch degrades to a skip and never aborts the batch.
//! Progress streams through tracing as the run proceeds.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use updown_core::{ClosedMarket, InvalidMarket, PriceHistoryProvider, PricePoint};

use crate::metrics::Summary;
use crate::resolution::{resolve_winner, Resolution};
use crate::settlement::{settle, TradeRecord};
use crate::trigger::detect_trigger;

/// Parameters for one backtest run.
///
/// Passed by value into the engine rather than read from globals, so runs
/// with different parameter combinations cannot interfere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestConfig {
    /// Entry threshold on implied probability, in (0, 1].
    pub threshold: Decimal,
    /// Fixed per-contract friction charged regardless of outcome.
    pub fee: Decimal,
    /// Trading window length in seconds.
    pub window_secs: i64,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            threshold: Decimal::new(97, 2), // 0.97
            fee: Decimal::new(2, 2),        // 0.02
            window_secs: 900,
        }
    }
}

impl BacktestConfig {
    /// Sets the entry threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: Decimal) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the per-contract fee.
    #[must_use]
    pub fn with_fee(mut self, fee: Decimal) -> Self {
        self.fee = fee;
        self
    }
}

/// Outcome of a backtest run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestReport {
    /// Closed markets considered, including skipped ones.
    pub scanned: usize,
    /// Markets excluded for malformed data or failed price fetches.
    pub skipped: usize,
    /// Well-formed markets where no tick reached the threshold.
    pub no_trigger: usize,
    /// Settled trades, in market discovery order.
    pub trades: Vec<TradeRecord>,
}

impl BacktestReport {
    /// Aggregates the trade records into summary statistics.
    #[must_use]
    pub fn summary(&self) -> Summary {
        Summary::from_trades(&self.trades)
    }
}

/// Sequential backtest orchestrator.
pub struct BacktestEngine {
    config: BacktestConfig,
    provider: Arc<dyn PriceHistoryProvider>,
}

impl BacktestEngine {
    /// Creates an engine over the given price-history source.
    #[must_use]
    pub fn new(config: BacktestConfig, provider: Arc<dyn PriceHistoryProvider>) -> Self {
        Self { config, provider }
    }

    /// Returns the run configuration.
    #[must_use]
    pub fn config(&self) -> &BacktestConfig {
        &self.config
    }

    /// Runs the backtest over the discovered markets.
    ///
    /// Takes validation results rather than bare markets so that malformed
    /// records flow through the same skip accounting as fetch failures.
    pub async fn run(
        &self,
        markets: Vec<Result<ClosedMarket, InvalidMarket>>,
    ) -> BacktestReport {
        let mut report = BacktestReport {
            scanned: markets.len(),
            skipped: 0,
            no_trigger: 0,
            trades: Vec::new(),
        };

        for market in markets {
            let market = match market {
                Ok(m) => m,
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping malformed market");
                    report.skipped += 1;
                    continue;
                }
            };

            match self.evaluate_market(&market).await {
                Ok(Some(trade)) => report.trades.push(trade),
                Ok(None) => report.no_trigger += 1,
                Err(e) => {
                    tracing::warn!(slug = %market.slug, error = %e, "Skipping market after failed evaluation");
                    report.skipped += 1;
                }
            }
        }

        let summary = report.summary();
        tracing::info!(
            scanned = report.scanned,
            skipped = report.skipped,
            trades = summary.trades,
            wins = summary.wins,
            "Backtest run complete"
        );

        report
    }

    /// Evaluates one market: fetch both sides, detect the trigger, score.
    ///
    /// `Ok(None)` means no tick reached the threshold.
    async fn evaluate_market(&self, market: &ClosedMarket) -> Result<Option<TradeRecord>> {
        let start_ts = market.window_start(self.config.window_secs);
        let end_ts = market.end_ts;

        let mut histories: [Vec<PricePoint>; 2] = [Vec::new(), Vec::new()];
        for (side, token_id) in market.token_ids.iter().enumerate() {
            histories[side] = self
                .provider
                .price_history(token_id, start_ts, end_ts)
                .await
                .with_context(|| format!("price history fetch for token {token_id}"))?;
        }

        tracing::debug!(
            slug = %market.slug,
            points_a = histories[0].len(),
            points_b = histories[1].len(),
            "Fetched price history"
        );

        let Some(trigger) = detect_trigger(self.config.threshold, &market.outcomes, &histories)
        else {
            tracing::info!(slug = %market.slug, "No trigger");
            return Ok(None);
        };

        let resolution = resolve_winner(&market.outcomes, market.outcome_prices.as_ref());
        if resolution == Resolution::Unknown {
            tracing::warn!(slug = %market.slug, "Settlement prices missing or malformed; scoring as no winner");
        }

        let trade = settle(
            &market.slug,
            &trigger,
            &resolution,
            self.config.fee,
            end_ts,
        );

        tracing::info!(
            slug = %market.slug,
            side = %trade.side,
            price = %trade.price,
            winner = trade.winner.as_deref().unwrap_or("-"),
            pnl = %trade.pnl,
            tte_secs = trade.tte_secs,
            "Trigger"
        );

        Ok(Some(trade))
    }
}
