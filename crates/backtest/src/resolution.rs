//! Resolved-winner extraction from final settlement prices.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Minimum settlement price for the top outcome to count as a confident
/// resolution. Prices near 0.5 indicate an ambiguous or not-yet-settled
/// market and must not be treated as a winner.
pub const CONFIDENT_SETTLEMENT: Decimal = Decimal::from_parts(9, 0, 0, false, 1); // 0.9

/// Outcome of resolution extraction.
///
/// `Undefined` and `Unknown` both score as "no side won", but they are
/// distinct so diagnostics can tell a parsed-but-ambiguous settlement from
/// malformed input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    /// Settlement prices confidently name this outcome label the winner.
    Winner(String),
    /// Prices parsed but the maximum does not exceed the confidence bound.
    Undefined,
    /// Settlement prices were absent or malformed on the wire.
    Unknown,
}

impl Resolution {
    /// Returns the winning label, if resolution is defined.
    #[must_use]
    pub fn winner(&self) -> Option<&str> {
        match self {
            Self::Winner(label) => Some(label),
            Self::Undefined | Self::Unknown => None,
        }
    }
}

/// Extracts the resolved winner for one market.
///
/// Picks the outcome with the highest settlement price; it is accepted as
/// winner only if that price strictly exceeds [`CONFIDENT_SETTLEMENT`].
/// `None` prices mean the wire field never parsed and yield `Unknown`.
#[must_use]
pub fn resolve_winner(outcomes: &[String; 2], prices: Option<&[Decimal; 2]>) -> Resolution {
    let Some(prices) = prices else {
        return Resolution::Unknown;
    };

    let (index, max) = if prices[0] >= prices[1] {
        (0, prices[0])
    } else {
        (1, prices[1])
    };

    if max > CONFIDENT_SETTLEMENT {
        Resolution::Winner(outcomes[index].clone())
    } else {
        Resolution::Undefined
    }
}
