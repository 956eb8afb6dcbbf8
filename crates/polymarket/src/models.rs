//! Polymarket wire models.
//!
//! Gamma `/markets` records carry several fields double-encoded as JSON
//! strings (`outcomes`, `outcomePrices`, `clobTokenIds` arrive as strings
//! containing JSON arrays). Parsing of those happens here, and the result
//! is converted into the validated `updown_core::ClosedMarket`.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

use updown_core::{ClosedMarket, InvalidMarket, PricePoint};

/// Raw market record from the Gamma `/markets` listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GammaMarket {
    pub slug: Option<String>,
    /// JSON-encoded array of outcome labels, e.g. `"[\"Up\", \"Down\"]"`.
    pub outcomes: Option<String>,
    /// JSON-encoded array of settlement prices, e.g. `"[\"0.98\", \"0.02\"]"`.
    pub outcome_prices: Option<String>,
    /// JSON-encoded array of CLOB token ids, index-aligned with `outcomes`.
    pub clob_token_ids: Option<String>,
    #[serde(default)]
    pub closed: bool,
    pub end_date: Option<String>,
}

impl GammaMarket {
    /// Returns the slug, or `"?"` for records missing one.
    #[must_use]
    pub fn slug(&self) -> &str {
        self.slug.as_deref().unwrap_or("?")
    }

    /// Returns true if the slug starts with the given prefix.
    #[must_use]
    pub fn slug_matches(&self, prefix: &str) -> bool {
        self.slug.as_deref().is_some_and(|s| s.starts_with(prefix))
    }

    /// Decodes the double-encoded outcome labels.
    fn parse_outcomes(&self) -> Result<Vec<String>, InvalidMarket> {
        parse_string_array(self.outcomes.as_deref(), "outcomes")
    }

    /// Decodes the double-encoded CLOB token ids.
    fn parse_token_ids(&self) -> Result<Vec<String>, InvalidMarket> {
        parse_string_array(self.clob_token_ids.as_deref(), "clobTokenIds")
    }

    /// Decodes the double-encoded settlement prices.
    ///
    /// Unlike outcomes and token ids, malformed or absent settlement
    /// prices do not invalidate the market: the winner is then unknown
    /// and every hypothetical trade on it scores as a loss.
    #[must_use]
    pub fn parse_outcome_prices(&self) -> Option<[Decimal; 2]> {
        let raw = self.outcome_prices.as_deref()?;
        let parts: Vec<String> = serde_json::from_str(raw).ok()?;
        let parts: [String; 2] = parts.try_into().ok()?;
        let up = Decimal::from_str(&parts[0]).ok()?;
        let down = Decimal::from_str(&parts[1]).ok()?;
        Some([up, down])
    }

    /// Validates this record into a backtestable market.
    ///
    /// # Errors
    ///
    /// Returns `InvalidMarket` for missing/malformed token or outcome
    /// arrays, wrong side counts, or an unparseable end date.
    pub fn to_closed_market(&self) -> Result<ClosedMarket, InvalidMarket> {
        let outcomes = self.parse_outcomes()?;
        let token_ids = self.parse_token_ids()?;
        let end_date = self
            .end_date
            .as_deref()
            .ok_or_else(|| InvalidMarket::MalformedField {
                field: "endDate",
                reason: "missing".to_string(),
            })?;

        ClosedMarket::try_new(
            self.slug().to_string(),
            outcomes,
            token_ids,
            end_date,
            self.parse_outcome_prices(),
        )
    }
}

fn parse_string_array(
    raw: Option<&str>,
    field: &'static str,
) -> Result<Vec<String>, InvalidMarket> {
    let raw = raw.ok_or_else(|| InvalidMarket::MalformedField {
        field,
        reason: "missing".to_string(),
    })?;
    serde_json::from_str(raw).map_err(|e| InvalidMarket::MalformedField {
        field,
        reason: e.to_string(),
    })
}

/// Raw tick from the CLOB `/prices-history` endpoint.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RawPricePoint {
    /// Unix timestamp in seconds.
    pub t: i64,
    /// Implied probability as a float.
    pub p: f64,
}

/// Response envelope for `/prices-history`.
#[derive(Debug, Clone, Deserialize)]
pub struct PriceHistoryResponse {
    #[serde(default)]
    pub history: Vec<RawPricePoint>,
}

impl PriceHistoryResponse {
    /// Converts the raw history into core ticks, dropping any tick whose
    /// probability is not representable as a decimal.
    #[must_use]
    pub fn into_points(self) -> Vec<PricePoint> {
        self.history
            .into_iter()
            .filter_map(|raw| {
                Decimal::try_from(raw.p)
                    .ok()
                    .map(|p| PricePoint { t: raw.t, p })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_market() -> GammaMarket {
        GammaMarket {
            slug: Some("btc-updown-15m-1769860800".to_string()),
            outcomes: Some(r#"["Up", "Down"]"#.to_string()),
            outcome_prices: Some(r#"["0.98", "0.02"]"#.to_string()),
            clob_token_ids: Some(r#"["tok-up", "tok-down"]"#.to_string()),
            closed: true,
            end_date: Some("2026-01-31T12:15:00Z".to_string()),
        }
    }

    #[test]
    fn parses_gamma_listing_json() {
        let json = r#"{
            "slug": "btc-updown-15m-1769860800",
            "outcomes": "[\"Up\", \"Down\"]",
            "outcomePrices": "[\"0.98\", \"0.02\"]",
            "clobTokenIds": "[\"tok-up\", \"tok-down\"]",
            "closed": true,
            "endDate": "2026-01-31T12:15:00Z"
        }"#;

        let market: GammaMarket = serde_json::from_str(json).unwrap();
        assert_eq!(market.slug(), "btc-updown-15m-1769860800");
        assert!(market.closed);
        assert!(market.slug_matches("btc-updown-15m-"));
        assert!(!market.slug_matches("eth-updown-15m-"));
    }

    #[test]
    fn converts_to_closed_market() {
        let market = sample_market().to_closed_market().unwrap();
        assert_eq!(market.outcomes, ["Up".to_string(), "Down".to_string()]);
        assert_eq!(market.token_ids[0], "tok-up");
        assert_eq!(market.end_ts, 1769861700);
        assert_eq!(market.outcome_prices, Some([dec!(0.98), dec!(0.02)]));
    }

    #[test]
    fn rejects_missing_token_ids() {
        let mut market = sample_market();
        market.clob_token_ids = None;
        let err = market.to_closed_market().unwrap_err();
        assert!(matches!(
            err,
            InvalidMarket::MalformedField {
                field: "clobTokenIds",
                ..
            }
        ));
    }

    #[test]
    fn rejects_unparseable_outcomes() {
        let mut market = sample_market();
        market.outcomes = Some("not json".to_string());
        let err = market.to_closed_market().unwrap_err();
        assert!(matches!(
            err,
            InvalidMarket::MalformedField { field: "outcomes", .. }
        ));
    }

    #[test]
    fn rejects_three_sided_market() {
        let mut market = sample_market();
        market.outcomes = Some(r#"["Up", "Down", "Sideways"]"#.to_string());
        let err = market.to_closed_market().unwrap_err();
        assert!(matches!(err, InvalidMarket::WrongOutcomeCount(3)));
    }

    #[test]
    fn malformed_outcome_prices_do_not_invalidate() {
        let mut market = sample_market();
        market.outcome_prices = Some("oops".to_string());
        let converted = market.to_closed_market().unwrap();
        assert!(converted.outcome_prices.is_none());
    }

    #[test]
    fn absent_outcome_prices_do_not_invalidate() {
        let mut market = sample_market();
        market.outcome_prices = None;
        let converted = market.to_closed_market().unwrap();
        assert!(converted.outcome_prices.is_none());
    }

    #[test]
    fn parses_price_history_response() {
        let json = r#"{"history": [{"t": 100, "p": 0.975}, {"t": 101, "p": 0.99}]}"#;
        let response: PriceHistoryResponse = serde_json::from_str(json).unwrap();
        let points = response.into_points();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].t, 100);
        assert_eq!(points[0].p, dec!(0.975));
    }

    #[test]
    fn missing_history_field_is_empty_series() {
        let response: PriceHistoryResponse = serde_json::from_str("{}").unwrap();
        assert!(response.into_points().is_empty());
    }
}
