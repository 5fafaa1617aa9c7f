//! Behavior-driven tests for the dashboard data sources
//!
//! These tests verify HOW each fetcher behaves against a scripted upstream:
//! caching windows, fallback on failure, and output shape guarantees.

use sentix_core::{
    AssetId, Classification, HttpError, HttpResponse, ManualClock, NewsSampler, PriceFetcher,
    PriceFetcherConfig, ScriptedHttpClient, SentimentFetcher, SentimentFetcherConfig,
};
use sentix_tests::{asset, fear_greed_body, PRICES_BODY};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

// =============================================================================
// Prices: caching window
// =============================================================================

#[tokio::test]
async fn when_prices_are_requested_twice_within_a_minute_upstream_is_called_once() {
    // Given: A healthy market-data endpoint
    let client = Arc::new(
        ScriptedHttpClient::new().route("simple/price", Ok(HttpResponse::ok_json(PRICES_BODY))),
    );
    let clock = Arc::new(ManualClock::new());
    let fetcher = PriceFetcher::with_clock(PriceFetcherConfig::default(), client.clone(), clock.clone());

    // When: Two renders happen 30 seconds apart
    let first = fetcher.get_prices().await;
    clock.advance(Duration::from_secs(30));
    let second = fetcher.get_prices().await;

    // Then: Only one network request was made and both renders match
    assert_eq!(client.request_count(), 1);
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
    for price in first.values() {
        assert!(price.price_usd >= 0.0);
    }
}

#[tokio::test]
async fn when_the_price_cache_expires_the_next_render_refetches() {
    // Given: A cached price book
    let client = Arc::new(
        ScriptedHttpClient::new().route("simple/price", Ok(HttpResponse::ok_json(PRICES_BODY))),
    );
    let clock = Arc::new(ManualClock::new());
    let fetcher = PriceFetcher::with_clock(PriceFetcherConfig::default(), client.clone(), clock.clone());
    fetcher.get_prices().await;

    // When: A full minute passes
    clock.advance(Duration::from_secs(60));
    fetcher.get_prices().await;

    // Then: A second request goes upstream
    assert_eq!(client.request_count(), 2);
}

// =============================================================================
// Prices: failure handling
// =============================================================================

#[tokio::test]
async fn when_market_data_times_out_the_fallback_book_is_served_promptly() {
    // Given: An upstream that never answers within the budget
    let client = Arc::new(
        ScriptedHttpClient::new()
            .route("simple/price", Ok(HttpResponse::ok_json(PRICES_BODY)))
            .with_delay(Duration::from_secs(5)),
    );
    let config = PriceFetcherConfig {
        timeout_ms: 50,
        ..PriceFetcherConfig::default()
    };
    let fetcher = PriceFetcher::new(config, client);

    // When: The dashboard asks for prices
    let started = Instant::now();
    let book = fetcher.get_prices().await;

    // Then: The static fallback comes back without waiting for the upstream
    assert!(started.elapsed() < Duration::from_secs(2));
    assert_eq!(book[&asset("bitcoin")].price_usd, 96_450.20);
    assert_eq!(book[&asset("bitcoin")].change_24h_pct, 2.45);
    assert_eq!(book[&asset("ethereum")].price_usd, 3_450.12);
    assert_eq!(book[&asset("ethereum")].change_24h_pct, -1.20);
}

#[tokio::test]
async fn during_an_outage_every_render_retries_the_upstream() {
    // Given: A market-data endpoint returning 500
    let client = Arc::new(
        ScriptedHttpClient::new().route("simple/price", Ok(HttpResponse::with_status(500, "boom"))),
    );
    let fetcher = PriceFetcher::new(PriceFetcherConfig::default(), client.clone());

    // When: Three renders happen back to back
    for _ in 0..3 {
        let book = fetcher.get_prices().await;
        assert_eq!(book.len(), 2);
    }

    // Then: The fallback was never cached
    assert_eq!(client.request_count(), 3);
}

#[tokio::test]
async fn when_the_connection_is_refused_prices_still_have_the_right_shape() {
    // Given: No route to the upstream at all
    let client = Arc::new(
        ScriptedHttpClient::new().route("simple/price", Err(HttpError::Connect("refused".into()))),
    );
    let fetcher = PriceFetcher::new(PriceFetcherConfig::default(), client);

    // When / Then: Every configured asset is present
    let book = fetcher.get_prices().await;
    let ids: Vec<&str> = book.keys().map(AssetId::as_str).collect();
    assert_eq!(ids, vec!["bitcoin", "ethereum"]);
}

// =============================================================================
// Sentiment
// =============================================================================

#[tokio::test]
async fn sentiment_history_always_has_the_requested_length() {
    // Given: One healthy and one broken index endpoint
    let week: Vec<(u8, &str, i64)> = (0..7)
        .map(|day| (40 + day as u8, "Fear", 1_700_000_000 - day * 86_400))
        .collect();
    let healthy = Arc::new(
        ScriptedHttpClient::new().route("fng", Ok(HttpResponse::ok_json(fear_greed_body(&week)))),
    );
    let broken = Arc::new(
        ScriptedHttpClient::new().route("fng", Ok(HttpResponse::ok_json("not json"))),
    );

    // When: Both are asked for a week of readings
    let live = SentimentFetcher::new(SentimentFetcherConfig::default(), healthy)
        .get_sentiment_history(7)
        .await;
    let fallback = SentimentFetcher::new(SentimentFetcherConfig::default(), broken)
        .get_sentiment_history(7)
        .await;

    // Then: Both return exactly seven readings
    assert_eq!(live.len(), 7);
    assert_eq!(fallback.len(), 7);
    assert_eq!(live[0].value, 40);
    assert!(fallback
        .iter()
        .all(|reading| reading.value == 78 && reading.classification == Classification::ExtremeGreed));
}

#[tokio::test]
async fn sentiment_record_fields_are_coerced_to_typed_values() {
    // Given: The canonical string-encoded record
    let body = fear_greed_body(&[(78, "Extreme Greed", 1_700_000_000)]);
    let client = Arc::new(ScriptedHttpClient::new().route("fng", Ok(HttpResponse::ok_json(body))));
    let fetcher = SentimentFetcher::new(SentimentFetcherConfig::default(), client);

    // When: A single reading is requested
    let history = fetcher.get_sentiment_history(1).await;

    // Then: Value, label and timestamp are typed
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].value, 78);
    assert_eq!(history[0].classification, Classification::ExtremeGreed);
    assert_eq!(history[0].timestamp.unix_seconds(), 1_700_000_000);
}

#[tokio::test]
async fn sentiment_is_cached_for_an_hour() {
    // Given: A healthy index endpoint
    let body = fear_greed_body(&[(55, "Neutral", 1_700_000_000)]);
    let client = Arc::new(ScriptedHttpClient::new().route("fng", Ok(HttpResponse::ok_json(body))));
    let clock = Arc::new(ManualClock::new());
    let fetcher =
        SentimentFetcher::with_clock(SentimentFetcherConfig::default(), client.clone(), clock.clone());

    // When: Renders happen across 59 minutes
    for _ in 0..60 {
        fetcher.get_sentiment_history(1).await;
        clock.advance(Duration::from_secs(59));
    }

    // Then: The index was fetched once
    assert_eq!(client.request_count(), 1);
}

// =============================================================================
// Headlines
// =============================================================================

#[test]
fn headline_samples_never_repeat_and_cover_the_catalog() {
    // Given: A sampler over the built-in catalog
    let sampler = NewsSampler::new();
    let mut seen = HashSet::new();

    // When: Many feeds are drawn
    for _ in 0..200 {
        let items = sampler.sample_headlines(3).expect("3 fits the catalog");
        let distinct: HashSet<_> = items.iter().map(|item| item.headline).collect();

        // Then: Each feed has three different items
        assert_eq!(distinct.len(), 3);
        seen.extend(distinct);
    }

    // And: No catalog item is systematically excluded
    assert_eq!(seen.len(), sampler.catalog().len());
}
