//! Validated market records and price ticks.
//!
//! `ClosedMarket` is the entry point of the backtest core: discovery hands
//! the engine a list of these (or typed validation errors for markets that
//! could not be validated). Construction goes through [`ClosedMarket::try_new`]
//! so a malformed market is rejected whole, never partially processed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::time::iso_to_unix;

/// A single probability tick on one outcome's time series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Unix timestamp in seconds.
    pub t: i64,
    /// Implied probability, 0.0 to 1.0.
    pub p: Decimal,
}

/// Why a market record failed validation.
#[derive(Debug, thiserror::Error)]
pub enum InvalidMarket {
    /// A wire field needed for evaluation was missing or failed to parse.
    #[error("malformed field `{field}`: {reason}")]
    MalformedField { field: &'static str, reason: String },
    /// The market does not have exactly two outcome labels.
    #[error("expected 2 outcomes, got {0}")]
    WrongOutcomeCount(usize),
    /// The market does not have exactly two CLOB token ids.
    #[error("expected 2 token ids, got {0}")]
    WrongTokenCount(usize),
    /// The window-end timestamp could not be parsed.
    #[error("bad end date: {0}")]
    BadEndDate(String),
}

/// A closed binary market, validated for backtesting.
///
/// Outcome labels and token ids are index-aligned 1:1: `token_ids[i]` is
/// the CLOB token whose price history prices `outcomes[i]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClosedMarket {
    /// Market slug, e.g. `btc-updown-15m-1769860800`.
    pub slug: String,
    /// The two outcome labels, in wire order.
    pub outcomes: [String; 2],
    /// The two CLOB token ids, index-aligned with `outcomes`.
    pub token_ids: [String; 2],
    /// End of the trading window, unix seconds.
    pub end_ts: i64,
    /// Final settlement prices, index-aligned with `outcomes`.
    ///
    /// `None` means the wire field was absent or malformed. That is not a
    /// validation failure: the market is still evaluated, but its
    /// resolution is unknown rather than undefined, and scored as no win.
    pub outcome_prices: Option<[Decimal; 2]>,
}

impl ClosedMarket {
    /// Validates and builds a closed market record.
    ///
    /// # Errors
    ///
    /// Returns `InvalidMarket` if the market does not have exactly two
    /// outcomes and two token ids, or if the end date does not parse.
    pub fn try_new(
        slug: String,
        outcomes: Vec<String>,
        token_ids: Vec<String>,
        end_date_iso: &str,
        outcome_prices: Option<[Decimal; 2]>,
    ) -> Result<Self, InvalidMarket> {
        let outcomes: [String; 2] = outcomes
            .try_into()
            .map_err(|v: Vec<String>| InvalidMarket::WrongOutcomeCount(v.len()))?;
        let token_ids: [String; 2] = token_ids
            .try_into()
            .map_err(|v: Vec<String>| InvalidMarket::WrongTokenCount(v.len()))?;
        let end_ts =
            iso_to_unix(end_date_iso).map_err(|e| InvalidMarket::BadEndDate(e.to_string()))?;

        Ok(Self {
            slug,
            outcomes,
            token_ids,
            end_ts,
            outcome_prices,
        })
    }

    /// Start of the trading window for the given window length.
    #[must_use]
    pub fn window_start(&self, window_secs: i64) -> i64 {
        self.end_ts - window_secs
    }
}
