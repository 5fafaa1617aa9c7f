//! The three dashboard data sources.
//!
//! | Fetcher | Upstream | Cache TTL | On failure |
//! |---------|----------|-----------|------------|
//! | [`PriceFetcher`] | CoinGecko simple price | 60 s | static last-known-good prices |
//! | [`SentimentFetcher`] | alternative.me Fear & Greed | 1 h | `count` synthetic readings |
//! | [`NewsSampler`] | embedded catalog | none | n/a |
//!
//! The network fetchers never return an error: an [`UpstreamError`] is
//! logged and replaced by the fallback value before it leaves the fetcher.

mod news;
mod price;
mod sentiment;

pub use news::{NewsSampler, HEADLINE_CATALOG};
pub use price::{fallback_prices, PriceFetcher};
pub use sentiment::{fallback_history, SentimentFetcher};

use crate::error::UpstreamError;
use crate::http_client::{HttpClient, HttpRequest};

/// Issue `request` and return the body of a 2xx response.
///
/// The transport is also given the timeout, but the outer guard makes sure
/// a transport that ignores it cannot stall a render cycle.
async fn get_body(client: &dyn HttpClient, request: HttpRequest) -> Result<String, UpstreamError> {
    let timeout_ms = request.timeout_ms;
    tracing::debug!(url = %request.url, timeout_ms, "upstream request");

    let response = tokio::time::timeout(request.timeout(), client.execute(request))
        .await
        .map_err(|_| UpstreamError::Timeout { timeout_ms })?
        .map_err(|error| {
            if error.is_timeout() {
                UpstreamError::Timeout { timeout_ms }
            } else {
                UpstreamError::Transport(error)
            }
        })?;

    if !response.is_success() {
        return Err(UpstreamError::Status {
            status: response.status,
        });
    }

    Ok(response.body)
}
