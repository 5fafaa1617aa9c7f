use std::sync::Arc;

use serde::Deserialize;

use crate::cache::TtlCache;
use crate::clock::{Clock, SystemClock};
use crate::config::{SentimentFetcherConfig, FALLBACK_SENTIMENT_VALUE};
use crate::domain::{Classification, SentimentReading, UtcDateTime};
use crate::error::UpstreamError;
use crate::http_client::{HttpClient, HttpRequest};

use super::get_body;

/// Recent daily Fear & Greed readings, cached for one hour per `count`.
#[derive(Debug)]
pub struct SentimentFetcher {
    config: SentimentFetcherConfig,
    http_client: Arc<dyn HttpClient>,
    cache: TtlCache<Vec<SentimentReading>, UpstreamError>,
}

impl SentimentFetcher {
    pub fn new(config: SentimentFetcherConfig, http_client: Arc<dyn HttpClient>) -> Self {
        Self::with_clock(config, http_client, Arc::new(SystemClock))
    }

    pub fn with_clock(
        config: SentimentFetcherConfig,
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

    /// Return exactly `count` readings, newest first.
    ///
    /// The first element is the current reading. When the index endpoint is
    /// unavailable, `count` identical fallback readings stamped "now" are
    /// returned and nothing is cached.
    pub async fn get_sentiment_history(&self, count: usize) -> Vec<SentimentReading> {
        // The upstream reads `limit=0` as "all history".
        if count == 0 {
            return Vec::new();
        }

        let key = format!("fng:limit={count}");
        match self
            .cache
            .get_or_try_fetch(&key, || self.fetch_live(count))
            .await
        {
            Ok(history) => history,
            Err(error) => {
                tracing::warn!(%error, count, "sentiment endpoint unavailable, serving fallback readings");
                fallback_history(count, UtcDateTime::now())
            }
        }
    }

    async fn fetch_live(&self, count: usize) -> Result<Vec<SentimentReading>, UpstreamError> {
        let url = format!("{}?limit={count}", self.config.endpoint);
        let request = HttpRequest::get(url)
            .with_header("accept", "application/json")
            .with_timeout_ms(self.config.timeout_ms);

        let body = get_body(self.http_client.as_ref(), request).await?;
        parse_fear_greed(&body, count)
    }
}

#[derive(Debug, Deserialize)]
struct FearGreedResponse {
    data: Vec<FearGreedRecord>,
}

#[derive(Debug, Deserialize)]
struct FearGreedRecord {
    value: Encoded,
    value_classification: String,
    timestamp: Encoded,
}

/// The index API string-encodes its integers; accept bare numbers too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Encoded {
    Text(String),
    Number(i64),
}

impl Encoded {
    fn as_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Number(number) => number.to_string(),
        }
    }
}

fn parse_fear_greed(body: &str, count: usize) -> Result<Vec<SentimentReading>, UpstreamError> {
    let response: FearGreedResponse = serde_json::from_str(body)?;

    if response.data.len() < count {
        return Err(UpstreamError::malformed(format!(
            "expected {count} readings, got {}",
            response.data.len()
        )));
    }

    response
        .data
        .iter()
        .take(count)
        .map(|record| {
            SentimentReading::from_raw(
                &record.value.as_text(),
                &record.value_classification,
                &record.timestamp.as_text(),
            )
            .map_err(UpstreamError::from)
        })
        .collect()
}

/// `count` copies of the static fallback reading, stamped `now`.
pub fn fallback_history(count: usize, now: UtcDateTime) -> Vec<SentimentReading> {
    let reading = SentimentReading {
        value: FALLBACK_SENTIMENT_VALUE,
        classification: Classification::ExtremeGreed,
        timestamp: now,
    };
    vec![reading; count]
}
