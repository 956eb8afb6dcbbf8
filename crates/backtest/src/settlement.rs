//! Trade scoring against the resolved winner.
//!
//! Models a binary contract bought at the trigger price that pays 1 on a
//! win and 0 on a loss, with a fixed fee charged regardless of outcome.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::resolution::Resolution;
use crate::trigger::Trigger;

/// Scored hypothetical trade for one market. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Market slug.
    pub slug: String,
    /// Outcome label the position was opened on.
    pub side: String,
    /// Entry price (the trigger tick's probability).
    pub price: Decimal,
    /// Resolved winner label, if resolution was defined.
    pub winner: Option<String>,
    /// Whether the triggered side was the resolved winner.
    pub won: bool,
    /// Profit/loss: `1 - price - fee` on a win, `-(price + fee)` otherwise.
    pub pnl: Decimal,
    /// Seconds from the trigger tick to the window end.
    pub tte_secs: i64,
}

/// Scores a triggered trade.
///
/// An `Undefined` or `Unknown` resolution never equals any side, so such
/// markets always score as losses. Always computable once a trigger exists.
#[must_use]
pub fn settle(
    slug: &str,
    trigger: &Trigger,
    resolution: &Resolution,
    fee: Decimal,
    window_end: i64,
) -> TradeRecord {
    let won = resolution.winner() == Some(trigger.outcome.as_str());
    let pnl = if won {
        Decimal::ONE - trigger.price - fee
    } else {
        -(trigger.price + fee)
    };

    TradeRecord {
        slug: slug.to_string(),
        side: trigger.outcome.clone(),
        price: trigger.price,
        winner: resolution.winner().map(str::to_string),
        won,
        pnl,
        tte_secs: window_end - trigger.time,
    }
}
