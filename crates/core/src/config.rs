//! Application configuration.
//!
//! Threshold and fee are explicit configuration passed into the backtest
//! rather than process-wide constants, so multiple parameter combinations
//! can be evaluated without interference.

use anyhow::{bail, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub strategy: StrategyConfig,
    pub discovery: DiscoveryConfig,
    pub api: ApiConfig,
}

/// Entry-signal parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    /// Minimum implied probability at which the hypothetical position opens.
    pub threshold: Decimal,
    /// Fixed per-contract friction charged regardless of outcome.
    pub fee: Decimal,
}

/// Market discovery parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Slug prefix identifying the market family to backtest.
    pub slug_prefix: String,
    /// Markets per listing page.
    pub page_size: u32,
    /// Upper bound on listing pages scanned per run.
    pub max_pages: u32,
}

/// External API endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub gamma_url: String,
    pub clob_url: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            threshold: Decimal::new(97, 2), // 0.97
            fee: Decimal::new(2, 2),        // 0.02
        }
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            slug_prefix: "btc-updown-15m-".to_string(),
            page_size: 200,
            max_pages: 50,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            gamma_url: "https://gamma-api.polymarket.com".to_string(),
            clob_url: "https://clob.polymarket.com".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl AppConfig {
    /// Checks that the configured parameters are usable.
    ///
    /// # Errors
    ///
    /// Returns an error for a threshold outside `(0, 1]`, a negative fee,
    /// or a zero page size.
    pub fn validate(&self) -> Result<()> {
        if self.strategy.threshold <= Decimal::ZERO || self.strategy.threshold > Decimal::ONE {
            bail!(
                "threshold must be in (0, 1], got {}",
                self.strategy.threshold
            );
        }
        if self.strategy.fee < Decimal::ZERO {
            bail!("fee must be non-negative, got {}", self.strategy.fee);
        }
        if self.discovery.page_size == 0 {
            bail!("page_size must be positive");
        }
        Ok(())
    }
}
