//! Entry-signal detection.
//!
//! Scans both outcome sides' tick series for the first tick whose implied
//! probability reaches the threshold, and picks the earlier of the two
//! per-side hits. Ordering is only assumed within each side's series, as
//! delivered by the price-history source, never across sides.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use updown_core::PricePoint;

/// The earliest threshold-crossing tick across both sides of a market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    /// Index of the triggered side (0 or 1, wire order).
    pub side_index: usize,
    /// Outcome label of the triggered side.
    pub outcome: String,
    /// Probability at the triggering tick; this is the hypothetical entry price.
    pub price: Decimal,
    /// Unix timestamp of the triggering tick.
    pub time: i64,
}

/// Finds the entry signal, if any.
///
/// Per side, only the first tick with `p >= threshold` counts (the
/// threshold is inclusive); across sides the smaller timestamp wins. When
/// both sides first qualify at the identical timestamp, the side whose
/// outcome label sorts lexicographically first is taken, falling back to
/// side index 0 for identical labels. That rule keeps the result
/// deterministic and independent of side ordering in the input.
#[must_use]
pub fn detect_trigger(
    threshold: Decimal,
    outcomes: &[String; 2],
    histories: &[Vec<PricePoint>; 2],
) -> Option<Trigger> {
    let mut trigger: Option<Trigger> = None;

    for (side_index, history) in histories.iter().enumerate() {
        let Some(hit) = history.iter().find(|point| point.p >= threshold) else {
            continue;
        };

        let candidate = Trigger {
            side_index,
            outcome: outcomes[side_index].clone(),
            price: hit.p,
            time: hit.t,
        };

        trigger = match trigger.take() {
            None => Some(candidate),
            Some(best) if candidate.time < best.time => Some(candidate),
            Some(best) if candidate.time == best.time && candidate.outcome < best.outcome => {
                Some(candidate)
            }
            Some(best) => Some(best),
        };
    }

    trigger
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn labels() -> [String; 2] {
        ["Up".to_string(), "Down".to_string()]
    }

    fn tick(t: i64, p: Decimal) -> PricePoint {
        PricePoint { t, p }
    }

    #[test]
    fn no_tick_reaches_threshold() {
        let histories = [
            vec![tick(10, dec!(0.5)), tick(20, dec!(0.92))],
            vec![tick(15, dec!(0.4)), tick(25, dec!(0.969))],
        ];
        assert_eq!(detect_trigger(dec!(0.97), &labels(), &histories), None);
    }

    #[test]
    fn threshold_is_inclusive() {
        let histories = [vec![tick(10, dec!(0.97))], vec![]];
        let trigger = detect_trigger(dec!(0.97), &labels(), &histories).unwrap();
        assert_eq!(trigger.outcome, "Up");
        assert_eq!(trigger.price, dec!(0.97));
        assert_eq!(trigger.time, 10);
    }

    #[test]
    fn empty_series_is_no_signal_not_error() {
        let histories: [Vec<PricePoint>; 2] = [vec![], vec![]];
        assert_eq!(detect_trigger(dec!(0.97), &labels(), &histories), None);
    }

    #[test]
    fn only_first_qualifying_tick_per_side_counts() {
        // Up first qualifies at t=50; its later hit at t=60 is irrelevant.
        // Down's first hit at t=40 is the overall trigger.
        let histories = [
            vec![tick(50, dec!(0.98)), tick(60, dec!(0.99))],
            vec![tick(40, dec!(0.975))],
        ];
        let trigger = detect_trigger(dec!(0.97), &labels(), &histories).unwrap();
        assert_eq!(trigger.outcome, "Down");
        assert_eq!(trigger.time, 40);
    }

    #[test]
    fn earlier_side_wins_regardless_of_input_order() {
        let up = vec![tick(150, dec!(0.99))];
        let down = vec![tick(100, dec!(0.975))];

        let forward = detect_trigger(
            dec!(0.97),
            &["Up".to_string(), "Down".to_string()],
            &[up.clone(), down.clone()],
        )
        .unwrap();
        let swapped = detect_trigger(
            dec!(0.97),
            &["Down".to_string(), "Up".to_string()],
            &[down, up],
        )
        .unwrap();

        assert_eq!(forward.outcome, "Down");
        assert_eq!(swapped.outcome, "Down");
        assert_eq!(forward.time, 100);
        assert_eq!(swapped.time, 100);
    }

    #[test]
    fn simultaneous_triggers_break_tie_lexicographically() {
        let up = vec![tick(100, dec!(0.98))];
        let down = vec![tick(100, dec!(0.99))];

        let forward = detect_trigger(
            dec!(0.97),
            &["Up".to_string(), "Down".to_string()],
            &[up.clone(), down.clone()],
        )
        .unwrap();
        let swapped = detect_trigger(
            dec!(0.97),
            &["Down".to_string(), "Up".to_string()],
            &[down, up],
        )
        .unwrap();

        // "Down" < "Up" lexicographically, on either input ordering.
        assert_eq!(forward.outcome, "Down");
        assert_eq!(swapped.outcome, "Down");
    }

    #[test]
    fn detector_is_deterministic() {
        let histories = [
            vec![tick(10, dec!(0.2)), tick(90, dec!(0.98))],
            vec![tick(30, dec!(0.975)), tick(31, dec!(0.99))],
        ];
        let first = detect_trigger(dec!(0.97), &labels(), &histories);
        let second = detect_trigger(dec!(0.97), &labels(), &histories);
        assert_eq!(first, second);
        assert_eq!(first.unwrap().time, 30);
    }
}
