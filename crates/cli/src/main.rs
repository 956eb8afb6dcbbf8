use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use nonzero_ext::nonzero;
use rust_decimal::Decimal;

use updown_backtest::{BacktestConfig, BacktestEngine};
use updown_core::ConfigLoader;
use updown_polymarket::{ClobClient, GammaClient};

mod report;

#[derive(Parser)]
#[command(name = "updown")]
#[command(about = "Backtests threshold-entry trades on closed up/down prediction markets", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "config/Config.toml")]
    config: String,

    /// Entry threshold override (implied probability, 0 < T <= 1)
    #[arg(long)]
    threshold: Option<Decimal>,

    /// Per-contract fee override
    #[arg(long)]
    fee: Option<Decimal>,
}

/// Gamma listing rate limit, requests per minute.
const GAMMA_RPM: NonZeroU32 = nonzero!(30u32);
/// CLOB prices-history rate limit, requests per minute.
const CLOB_RPM: NonZeroU32 = nonzero!(60u32);

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut config = ConfigLoader::load(&cli.config)?;
    if let Some(threshold) = cli.threshold {
        config.strategy.threshold = threshold;
    }
    if let Some(fee) = cli.fee {
        config.strategy.fee = fee;
    }
    config.validate()?;

    let timeout = Duration::from_secs(config.api.request_timeout_secs);
    let gamma = GammaClient::with_settings(GAMMA_RPM, timeout).with_base_url(&config.api.gamma_url);
    let clob = ClobClient::with_settings(CLOB_RPM, timeout).with_base_url(&config.api.clob_url);

    // Discovery failures are the one fatal path: propagate for a non-zero exit.
    let markets = gamma
        .discover_closed_markets(
            &config.discovery.slug_prefix,
            config.discovery.page_size,
            config.discovery.max_pages,
        )
        .await?;

    if markets.is_empty() {
        tracing::error!(
            prefix = %config.discovery.slug_prefix,
            "No markets found; check API availability and the slug prefix"
        );
        return Ok(());
    }

    let closed: Vec<_> = markets.iter().filter(|m| m.closed).collect();
    tracing::info!(total = markets.len(), closed = closed.len(), "Markets discovered");

    let engine_config = BacktestConfig::default()
        .with_threshold(config.strategy.threshold)
        .with_fee(config.strategy.fee);
    let engine = BacktestEngine::new(engine_config, Arc::new(clob));

    let inputs = closed.iter().map(|m| m.to_closed_market()).collect();
    let run = engine.run(inputs).await;

    print!("{}", report::format_report(&run, engine.config()));
    Ok(())
}
