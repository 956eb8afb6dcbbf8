//! Human-readable run report.

use updown_backtest::{BacktestConfig, BacktestReport};

/// Formats the final summary block, including the restated modeling
/// assumptions the numbers rest on.
#[must_use]
pub fn format_report(report: &BacktestReport, config: &BacktestConfig) -> String {
    let summary = report.summary();
    let mut output = String::new();

    output.push('\n');
    output.push_str("============================================================\n");
    output.push_str(&format!("Markets scanned  : {}\n", report.scanned));
    output.push_str(&format!("Skipped (bad data): {}\n", report.skipped));
    output.push_str(&format!("No trigger       : {}\n", report.no_trigger));
    output.push_str(&format!("Trades           : {}\n", summary.trades));
    output.push_str(&format!(
        "Wins             : {} ({:.1}%)\n",
        summary.wins,
        summary.win_rate * 100.0
    ));
    output.push_str(&format!("Avg PnL / trade  : {:.4}\n", summary.avg_pnl));
    if summary.trades > 0 {
        output.push_str(&format!("Total PnL        : {:.4}\n", summary.total_pnl));
        output.push_str(&format!("Avg TTE (secs)   : {}\n", summary.avg_tte_secs));
    }
    output.push_str("============================================================\n");

    output.push('\n');
    output.push_str("Assumptions:\n");
    output.push_str(&format!(
        "  - Entry at first price tick >= {}\n",
        config.threshold
    ));
    output.push_str(&format!("  - Fee/friction = {} per contract\n", config.fee));
    output.push_str("  - Fill assumed at observed price (no slippage model)\n");
    output.push_str("  - Read-only backtest; no live orders placed\n");

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use updown_backtest::TradeRecord;

    #[test]
    fn empty_run_formats_without_totals() {
        let report = BacktestReport {
            scanned: 5,
            skipped: 2,
            no_trigger: 3,
            trades: vec![],
        };
        let text = format_report(&report, &BacktestConfig::default());

        assert!(text.contains("Markets scanned  : 5"));
        assert!(text.contains("Wins             : 0 (0.0%)"));
        assert!(!text.contains("Total PnL"));
        assert!(text.contains("Entry at first price tick >= 0.97"));
    }

    #[test]
    fn populated_run_formats_totals() {
        let report = BacktestReport {
            scanned: 2,
            skipped: 0,
            no_trigger: 0,
            trades: vec![
                TradeRecord {
                    slug: "a".to_string(),
                    side: "Up".to_string(),
                    price: dec!(0.97),
                    winner: Some("Up".to_string()),
                    won: true,
                    pnl: dec!(0.01),
                    tte_secs: 700,
                },
                TradeRecord {
                    slug: "b".to_string(),
                    side: "Down".to_string(),
                    price: dec!(0.975),
                    winner: Some("Up".to_string()),
                    won: false,
                    pnl: dec!(-0.995),
                    tte_secs: 300,
                },
            ],
        };
        let text = format_report(&report, &BacktestConfig::default());

        assert!(text.contains("Trades           : 2"));
        assert!(text.contains("Wins             : 1 (50.0%)"));
        assert!(text.contains("Avg TTE (secs)   : 500"));
        assert!(text.contains("Total PnL"));
    }
}
