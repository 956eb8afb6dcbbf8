//! Polymarket API clients for the up/down backtester.
//!
//! Two read-only collaborators: the Gamma API for closed-market discovery
//! and the CLOB API for intra-window price history.

pub mod clob;
pub mod gamma;
pub mod models;

pub use clob::{ClobClient, CLOB_API_URL};
pub use gamma::{GammaClient, GAMMA_API_URL};
pub use models::GammaMarket;
