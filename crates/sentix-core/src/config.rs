//! Fixed dashboard settings.
//!
//! Every value here is a constant; the `Default` impls are the only source
//! of configuration for the library. Callers (the CLI, tests) override
//! individual fields on the structs when they need to.

use std::time::Duration;

use crate::domain::AssetId;
use crate::http_client::DEFAULT_TIMEOUT_MS;

pub const COINGECKO_SIMPLE_PRICE_URL: &str = "https://api.coingecko.com/api/v3/simple/price";
pub const FEAR_GREED_URL: &str = "https://api.alternative.me/fng/";

/// Quote currency requested from the market-data endpoint.
pub const QUOTE_CURRENCY: &str = "usd";

pub const DEFAULT_ASSETS: [&str; 2] = ["bitcoin", "ethereum"];

pub const PRICE_CACHE_TTL: Duration = Duration::from_secs(60);
pub const SENTIMENT_CACHE_TTL: Duration = Duration::from_secs(3_600);

pub const DEFAULT_SENTIMENT_DAYS: usize = 7;
pub const DEFAULT_HEADLINE_COUNT: usize = 3;

/// Last-known-good `(asset id, usd price, 24h change %)` served when the
/// market-data endpoint is unavailable.
pub const FALLBACK_PRICES: [(&str, f64, f64); 2] = [
    ("bitcoin", 96_450.20, 2.45),
    ("ethereum", 3_450.12, -1.20),
];

/// Reading served for every requested day when the index is unavailable.
pub const FALLBACK_SENTIMENT_VALUE: u8 = 78;

#[derive(Debug, Clone, PartialEq)]
pub struct PriceFetcherConfig {
    pub endpoint: String,
    pub assets: Vec<AssetId>,
    pub cache_ttl: Duration,
    pub timeout_ms: u64,
}

impl Default for PriceFetcherConfig {
    fn default() -> Self {
        Self {
            endpoint: String::from(COINGECKO_SIMPLE_PRICE_URL),
            assets: DEFAULT_ASSETS.into_iter().map(AssetId::from_static).collect(),
            cache_ttl: PRICE_CACHE_TTL,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SentimentFetcherConfig {
    pub endpoint: String,
    pub cache_ttl: Duration,
    pub timeout_ms: u64,
}

impl Default for SentimentFetcherConfig {
    fn default() -> Self {
        Self {
            endpoint: String::from(FEAR_GREED_URL),
            cache_ttl: SENTIMENT_CACHE_TTL,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

/// Settings for one dashboard render cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub prices: PriceFetcherConfig,
    pub sentiment: SentimentFetcherConfig,
    pub sentiment_days: usize,
    pub headline_count: usize,
}

impl DashboardConfig {
    /// Apply one timeout budget to both network fetchers.
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.prices.timeout_ms = timeout_ms;
        self.sentiment.timeout_ms = timeout_ms;
        self
    }

    pub fn with_sentiment_days(mut self, days: usize) -> Self {
        self.sentiment_days = days;
        self
    }

    pub fn with_headline_count(mut self, count: usize) -> Self {
        self.headline_count = count;
        self
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            prices: PriceFetcherConfig::default(),
            sentiment: SentimentFetcherConfig::default(),
            sentiment_days: DEFAULT_SENTIMENT_DAYS,
            headline_count: DEFAULT_HEADLINE_COUNT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_asset_ids_are_valid() {
        for id in DEFAULT_ASSETS
            .iter()
            .chain(FALLBACK_PRICES.iter().map(|(id, _, _)| id))
        {
            let parsed = AssetId::parse(id).expect("built-in id must parse");
            assert_eq!(parsed, AssetId::from_static(*id));
        }
    }

    #[test]
    fn every_default_asset_has_a_fallback_price() {
        for id in DEFAULT_ASSETS {
            assert!(FALLBACK_PRICES.iter().any(|(fallback, _, _)| *fallback == id));
        }
    }

    #[test]
    fn timeout_override_applies_to_both_fetchers() {
        let config = DashboardConfig::default().with_timeout_ms(750);
        assert_eq!(config.prices.timeout_ms, 750);
        assert_eq!(config.sentiment.timeout_ms, 750);
        assert_eq!(config.prices.cache_ttl, Duration::from_secs(60));
        assert_eq!(config.sentiment.cache_ttl, Duration::from_secs(3_600));
    }
}
