//! Core types, configuration, and provider traits shared across the
//! up/down backtester crates.

pub mod config;
pub mod config_loader;
pub mod market;
pub mod time;
pub mod traits;

pub use config::{ApiConfig, AppConfig, DiscoveryConfig, StrategyConfig};
pub use config_loader::ConfigLoader;
pub use market::{ClosedMarket, InvalidMarket, PricePoint};
pub use time::iso_to_unix;
pub use traits::PriceHistoryProvider;
