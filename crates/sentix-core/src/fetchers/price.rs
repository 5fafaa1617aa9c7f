use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;

use crate::cache::TtlCache;
use crate::clock::{Clock, SystemClock};
use crate::config::{PriceFetcherConfig, FALLBACK_PRICES, QUOTE_CURRENCY};
use crate::domain::{AssetId, AssetPrice, PriceBook};
use crate::error::UpstreamError;
use crate::http_client::{HttpClient, HttpRequest};

use super::get_body;

/// Current prices for the configured assets, cached for one minute.
#[derive(Debug)]
pub struct PriceFetcher {
    config: PriceFetcherConfig,
    http_client: Arc<dyn HttpClient>,
    cache: TtlCache<PriceBook, UpstreamError>,
}

impl PriceFetcher {
    pub fn new(config: PriceFetcherConfig, http_client: Arc<dyn HttpClient>) -> Self {
        Self::with_clock(config, http_client, Arc::new(SystemClock))
    }

    pub fn with_clock(
        config: PriceFetcherConfig,
        http_client: Arc<dyn HttpClient>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let cache = TtlCache::with_clock(config.cache_ttl, clock);
        Self {
            config,
            http_client,
            cache,
        }
    }

    pub fn assets(&self) -> &[AssetId] {
        &self.config.assets
    }

    /// Return one [`AssetPrice`] per configured asset.
    ///
    /// Live results are cached for the configured TTL. When the endpoint is
    /// unavailable the static fallback book is returned instead; it is not
    /// cached, so the next call tries the network again.
    pub async fn get_prices(&self) -> PriceBook {
        if self.config.assets.is_empty() {
            return PriceBook::new();
        }

        let key = self.cache_key();
        match self
            .cache
            .get_or_try_fetch(&key, || self.fetch_live())
            .await
        {
            Ok(book) => book,
            Err(error) => {
                tracing::warn!(%error, "price endpoint unavailable, serving fallback prices");
                fallback_prices(&self.config.assets)
            }
        }
    }

    fn cache_key(&self) -> String {
        format!("prices:{}:{}", self.ids_param(), QUOTE_CURRENCY)
    }

    fn ids_param(&self) -> String {
        self.config
            .assets
            .iter()
            .map(AssetId::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }

    async fn fetch_live(&self) -> Result<PriceBook, UpstreamError> {
        let url = format!(
            "{}?ids={}&vs_currencies={}&include_24hr_change=true",
            self.config.endpoint,
            urlencoding::encode(&self.ids_param()),
            QUOTE_CURRENCY
        );
        let request = HttpRequest::get(url)
            .with_header("accept", "application/json")
            .with_timeout_ms(self.config.timeout_ms);

        let body = get_body(self.http_client.as_ref(), request).await?;
        parse_simple_price(&body, &self.config.assets)
    }
}

#[derive(Debug, Deserialize)]
struct SimplePriceQuote {
    #[serde(default)]
    usd: Option<f64>,
    #[serde(default)]
    usd_24h_change: Option<f64>,
}

/// Map a `{id: {usd, usd_24h_change}}` payload onto the requested assets.
///
/// Every requested asset must be present with both fields; anything less is
/// treated as a malformed response.
fn parse_simple_price(body: &str, assets: &[AssetId]) -> Result<PriceBook, UpstreamError> {
    let payload: BTreeMap<String, SimplePriceQuote> = serde_json::from_str(body)?;

    assets
        .iter()
        .map(|asset| -> Result<(AssetId, AssetPrice), UpstreamError> {
            let quote = payload
                .get(asset.as_str())
                .ok_or_else(|| UpstreamError::malformed(format!("no quote for '{asset}'")))?;
            let price = quote
                .usd
                .ok_or_else(|| UpstreamError::malformed(format!("no usd price for '{asset}'")))?;
            let change = quote.usd_24h_change.ok_or_else(|| {
                UpstreamError::malformed(format!("no 24h change for '{asset}'"))
            })?;
            let price = AssetPrice::new(asset.clone(), price, change)?;
            Ok((asset.clone(), price))
        })
        .collect()
}

/// Static last-known-good prices for `assets`.
///
/// Assets without a built-in fallback are left out.
pub fn fallback_prices(assets: &[AssetId]) -> PriceBook {
    assets
        .iter()
        .filter_map(|asset| {
            FALLBACK_PRICES
                .iter()
                .find(|(id, _, _)| *id == asset.as_str())
                .map(|&(_, price_usd, change_24h_pct)| {
                    let price = AssetPrice {
                        asset_id: asset.clone(),
                        price_usd,
                        change_24h_pct,
                    };
                    (asset.clone(), price)
                })
        })
        .collect()
}
