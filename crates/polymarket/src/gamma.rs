//! Gamma API client for closed-market discovery.
//!
//! The Gamma listing holds over a million markets; the up/down families
//! are among the newest, so discovery pages in descending id order and
//! stops early once it has moved past the family's date range.

use anyhow::{anyhow, Result};
use governor::{Quota, RateLimiter};
use nonzero_ext::nonzero;
use reqwest::Client;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use crate::models::GammaMarket;

/// Gamma API base URL.
pub const GAMMA_API_URL: &str = "https://gamma-api.polymarket.com";

/// Consecutive no-hit pages tolerated after the first hit before
/// discovery stops early.
const EMPTY_PAGE_LIMIT: u32 = 3;

/// Gamma API client for paginated closed-market discovery.
pub struct GammaClient {
    /// HTTP client
    http: Client,
    /// Base URL for API
    base_url: String,
    /// Rate limiter (requests per minute)
    rate_limiter: Arc<
        RateLimiter<
            governor::state::NotKeyed,
            governor::state::InMemoryState,
            governor::clock::DefaultClock,
        >,
    >,
}

impl GammaClient {
    /// Creates a new client with default settings.
    ///
    /// Rate limited to 30 requests per minute, 30 second request timeout.
    pub fn new() -> Self {
        Self::with_settings(nonzero!(30u32), Duration::from_secs(30))
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
            base_url: GAMMA_API_URL.to_string(),
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

    /// Waits for rate limit and makes a GET request.
    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.rate_limiter.until_ready().await;

        let url = format!("{}{}", self.base_url, path);
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
            return Err(anyhow!("Gamma API error {}: {}", status, text));
        }

        let body = response.json::<T>().await?;
        Ok(body)
    }

    /// Fetches one page of closed markets, newest first.
    pub async fn list_closed_markets(&self, offset: u32, limit: u32) -> Result<Vec<GammaMarket>> {
        let path =
            format!("/markets?limit={limit}&offset={offset}&closed=true&order=id&ascending=false");
        self.get(&path).await
    }

    /// Discovers closed markets whose slug starts with `prefix`.
    ///
    /// Pages in descending id order. Stops on an empty page, after
    /// `max_pages`, or once `EMPTY_PAGE_LIMIT` consecutive pages had no
    /// hits after at least one hit was found (past the family's range).
    ///
    /// # Errors
    ///
    /// A listing request failure propagates and aborts discovery; this is
    /// the one phase where an HTTP error is fatal to the run.
    pub async fn discover_closed_markets(
        &self,
        prefix: &str,
        page_size: u32,
        max_pages: u32,
    ) -> Result<Vec<GammaMarket>> {
        let mut found = Vec::new();
        let mut offset = 0;
        let mut empty_pages = 0;

        tracing::info!(prefix, "Scanning Gamma for closed markets");

        for page in 0..max_pages {
            let batch = self.list_closed_markets(offset, page_size).await?;
            if batch.is_empty() {
                break;
            }

            let batch_len = batch.len();
            let hits: Vec<GammaMarket> =
                batch.into_iter().filter(|m| m.slug_matches(prefix)).collect();

            if hits.is_empty() {
                empty_pages += 1;
                if !found.is_empty() && empty_pages >= EMPTY_PAGE_LIMIT {
                    break;
                }
            } else {
                empty_pages = 0;
            }

            found.extend(hits);
            offset += page_size;

            tracing::info!(
                page = page + 1,
                batch = batch_len,
                total_found = found.len(),
                "Scanned listing page"
            );
        }

        tracing::info!(prefix, count = found.len(), "Discovery finished");
        Ok(found)
    }
}

impl Default for GammaClient {
    fn default() -> Self {
        Self::new()
    }
}
