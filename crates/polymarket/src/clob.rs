//! CLOB prices-history client.
//!
//! Fetches the intra-window tick series for one outcome token at 1-second
//! fidelity. The backtest engine consumes this through the
//! `PriceHistoryProvider` trait so tests can substitute an in-memory
//! source.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use governor::{Quota, RateLimiter};
use nonzero_ext::nonzero;
use reqwest::Client;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use updown_core::{PriceHistoryProvider, PricePoint};

use crate::models::PriceHistoryResponse;

/// CLOB API base URL.
pub const CLOB_API_URL: &str = "https://clob.polymarket.com";

/// Sampling granularity requested from the endpoint.
const FIDELITY: u32 = 1;

/// CLOB API client for historical price series.
pub struct ClobClient {
    http: Client,
    base_url: String,
    rate_limiter: Arc<
        RateLimiter<
            governor::state::NotKeyed,
            governor::state::InMemoryState,
            governor::clock::DefaultClock,
        >,
    >,
}

impl ClobClient {
    /// Creates a new client with default settings.
    ///
    /// Rate limited to 60 requests per minute, 30 second request timeout.
    pub fn new() -> Self {
        Self::with_settings(nonzero!(60u32), Duration::from_secs(30))
    }

    /// Creates a new client with custom rate limit and request timeout.
    pub fn with_settings(requests_per_minute: NonZeroU32, timeout: Duration) -> Self {
        let quota = Quota::per_minute(requests_per_minute);
        let rate_limiter = Arc::new(RateLimiter::direct(quota));

        Self {
            http: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            base_url: CLOB_API_URL.to_string(),
            rate_limiter,
        }
    }

    /// Sets a custom base URL (useful for testing).
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the tick series for a token over `[start_ts, end_ts]`.
    ///
    /// # Errors
    ///
    /// Returns an error on a non-success HTTP status or a malformed body.
    /// Callers treat this as fatal for the single market being evaluated.
    pub async fn price_history(
        &self,
        token_id: &str,
        start_ts: i64,
        end_ts: i64,
    ) -> Result<Vec<PricePoint>> {
        self.rate_limiter.until_ready().await;

        let url = format!(
            "{}/prices-history?market={token_id}&startTs={start_ts}&endTs={end_ts}&fidelity={FIDELITY}",
            self.base_url
        );
        tracing::debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(anyhow!("CLOB API error {}: {}", status, text));
        }

        let body = response.json::<PriceHistoryResponse>().await?;
        Ok(body.into_points())
    }
}

#[async_trait]
impl PriceHistoryProvider for ClobClient {
    async fn price_history(
        &self,
        token_id: &str,
        start_ts: i64,
        end_ts: i64,
    ) -> Result<Vec<PricePoint>> {
        ClobClient::price_history(self, token_id, start_ts, end_ts).await
    }
}

impl Default for ClobClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_client_creation() {
        let client = ClobClient::new();
        assert_eq!(client.base_url(), CLOB_API_URL);
    }

    #[tokio::test]
    async fn test_price_history_query_shape() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/prices-history"))
            .and(query_param("market", "tok-up"))
            .and(query_param("startTs", "1769860800"))
            .and(query_param("endTs", "1769861700"))
            .and(query_param("fidelity", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "history": [
                    {"t": 1769860810, "p": 0.52},
                    {"t": 1769860870, "p": 0.975}
                ]
            })))
            .mount(&mock_server)
            .await;

        let client = ClobClient::new().with_base_url(mock_server.uri());
        let points = client
            .price_history("tok-up", 1769860800, 1769861700)
            .await
            .unwrap();

        assert_eq!(points.len(), 2);
        assert_eq!(points[1].t, 1769860870);
        assert_eq!(points[1].p, dec!(0.975));
    }

    #[tokio::test]
    async fn test_missing_history_is_empty() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/prices-history"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&mock_server)
            .await;

        let client = ClobClient::new().with_base_url(mock_server.uri());
        let points = client.price_history("tok-up", 0, 900).await.unwrap();

        assert!(points.is_empty());
    }

    #[tokio::test]
    async fn test_error_status_propagates() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/prices-history"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&mock_server)
            .await;

        let client = ClobClient::new().with_base_url(mock_server.uri());
        let result = client.price_history("tok-up", 0, 900).await;

        assert!(result.is_err());
    }
}
