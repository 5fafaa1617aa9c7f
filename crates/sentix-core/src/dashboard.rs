//! One render cycle of the dashboard.
//!
//! [`Dashboard`] owns the three fetchers and turns their outputs into a
//! [`DashboardSnapshot`] the presentation layer can draw directly: the
//! headline sentiment metric, an ascending trend series, price cards, and
//! the feed.

use std::sync::Arc;

use serde::Serialize;

use crate::clock::{Clock, SystemClock};
use crate::config::DashboardConfig;
use crate::domain::{NewsItem, PriceBook, SentimentReading, UtcDateTime};
use crate::fetchers::{NewsSampler, PriceFetcher, SentimentFetcher};
use crate::http_client::HttpClient;
use crate::ValidationError;

/// Sentiment series shaped for the metric card and the trend chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentimentPanel {
    /// Newest reading, shown as the headline metric.
    pub current: Option<SentimentReading>,
    /// Readings as fetched, newest first.
    pub history: Vec<SentimentReading>,
    /// Readings sorted oldest to newest for charting.
    pub trend: Vec<SentimentReading>,
}

impl SentimentPanel {
    pub fn from_history(history: Vec<SentimentReading>) -> Self {
        let current = history.first().cloned();
        let mut trend = history.clone();
        trend.sort_by_key(|reading| reading.timestamp);
        Self {
            current,
            history,
            trend,
        }
    }
}

/// Everything one render needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub prices: PriceBook,
    pub sentiment: SentimentPanel,
    pub headlines: Vec<NewsItem>,
    pub rendered_at: UtcDateTime,
}

/// The data-acquisition layer behind the dashboard.
#[derive(Debug)]
pub struct Dashboard {
    prices: PriceFetcher,
    sentiment: SentimentFetcher,
    news: NewsSampler,
    sentiment_days: usize,
    headline_count: usize,
}

impl Dashboard {
    pub fn new(config: DashboardConfig, http_client: Arc<dyn HttpClient>) -> Result<Self, ValidationError> {
        Self::with_parts(config, http_client, Arc::new(SystemClock), NewsSampler::new())
    }

    /// Build with an explicit clock and sampler, e.g. for deterministic tests.
    ///
    /// Fails when `headline_count` exceeds the sampler's catalog.
    pub fn with_parts(
        config: DashboardConfig,
        http_client: Arc<dyn HttpClient>,
        clock: Arc<dyn Clock>,
        news: NewsSampler,
    ) -> Result<Self, ValidationError> {
        let available = news.catalog().len();
        if config.headline_count > available {
            return Err(ValidationError::SampleTooLarge {
                requested: config.headline_count,
                available,
            });
        }

        Ok(Self {
            prices: PriceFetcher::with_clock(config.prices, Arc::clone(&http_client), Arc::clone(&clock)),
            sentiment: SentimentFetcher::with_clock(config.sentiment, http_client, clock),
            news,
            sentiment_days: config.sentiment_days,
            headline_count: config.headline_count,
        })
    }

    pub fn prices(&self) -> &PriceFetcher {
        &self.prices
    }

    pub fn sentiment(&self) -> &SentimentFetcher {
        &self.sentiment
    }

    pub fn news(&self) -> &NewsSampler {
        &self.news
    }

    /// Fetch all three sources concurrently and shape the result.
    pub async fn snapshot(&self) -> DashboardSnapshot {
        let (prices, history) = tokio::join!(
            self.prices.get_prices(),
            self.sentiment.get_sentiment_history(self.sentiment_days),
        );
        let headlines = self.sample_headlines();

        tracing::debug!(
            assets = prices.len(),
            readings = history.len(),
            headlines = headlines.len(),
            "dashboard snapshot ready"
        );

        DashboardSnapshot {
            prices,
            sentiment: SentimentPanel::from_history(history),
            headlines,
            rendered_at: UtcDateTime::now(),
        }
    }

    fn sample_headlines(&self) -> Vec<NewsItem> {
        // The count was checked against the catalog in the constructor.
        self.news
            .sample_headlines(self.headline_count)
            .unwrap_or_else(|error| {
                tracing::warn!(%error, "headline sampling failed");
                Vec::new()
            })
    }
}
