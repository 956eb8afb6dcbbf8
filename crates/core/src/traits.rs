//! Provider traits implemented by the exchange crates.

use anyhow::Result;
use async_trait::async_trait;

use crate::market::PricePoint;

/// Source of intra-window price history for a single outcome token.
///
/// Implementations are expected to behave as a pure function of
/// `(token_id, start_ts, end_ts)`: the backtest engine may call this once
/// per side per market and assumes per-side time-ascending ordering as
/// delivered by the source.
#[async_trait]
pub trait PriceHistoryProvider: Send + Sync {
    /// Fetches the tick series for `token_id` over `[start_ts, end_ts]`.
    ///
    /// An empty series is a valid result (thin or unobserved markets).
    async fn price_history(
        &self,
        token_id: &str,
        start_ts: i64,
        end_ts: i64,
    ) -> Result<Vec<PricePoint>>;
}
