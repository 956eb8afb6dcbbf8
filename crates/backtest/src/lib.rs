//! Threshold-entry backtest engine for binary up/down markets.
//!
//! The core pipeline per market: detect the earliest threshold-crossing
//! tick across both outcome sides, extract the resolved winner from final
//! settlement prices, and score the hypothetical trade against it.

pub mod engine;
pub mod metrics;
pub mod resolution;
pub mod settlement;
pub mod trigger;

pub use engine::{BacktestConfig, BacktestEngine, BacktestReport};
pub use metrics::Summary;
pub use resolution::{resolve_winner, Resolution, CONFIDENT_SETTLEMENT};
pub use settlement::{settle, TradeRecord};
pub use trigger::{detect_trigger, Trigger};
